use crate::domain::model::{BucketSales, CategorySales, Dashboard};
use crate::domain::ports::Storage;
use crate::utils::error::{DashboardError, Result};
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

/// 把建好的儀表板輸出成檔案,走 Storage 介面
pub struct ReportWriter<S: Storage> {
    storage: S,
}

impl<S: Storage> ReportWriter<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub async fn write_json(&self, dashboard: &Dashboard, file_name: &str) -> Result<String> {
        let json = serde_json::to_string_pretty(dashboard)?;
        self.storage.write_file(file_name, json.as_bytes()).await?;
        Ok(file_name.to_string())
    }

    /// ZIP 打包:dashboard.json、走勢 CSV,熱門品項非空時多一份 CSV
    pub async fn write_bundle(&self, dashboard: &Dashboard, file_name: &str) -> Result<String> {
        let json = serde_json::to_string_pretty(dashboard)?;
        let series = series_csv(dashboard.sales_series())?;

        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            zip.start_file::<_, ()>("dashboard.json", FileOptions::default())?;
            zip.write_all(json.as_bytes())?;

            zip.start_file::<_, ()>("sales_series.csv", FileOptions::default())?;
            zip.write_all(&series)?;

            if !dashboard.popular_items().is_empty() {
                zip.start_file::<_, ()>("popular_items.csv", FileOptions::default())?;
                let popular = popular_csv(dashboard.popular_items())?;
                zip.write_all(&popular)?;
            }

            // 完成並取回底層 Vec<u8>
            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        tracing::debug!("Writing ZIP bundle ({} bytes) to storage", zip_data.len());
        self.storage.write_file(file_name, &zip_data).await?;
        Ok(file_name.to_string())
    }
}

fn series_csv(series: &[BucketSales]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for bucket in series {
        writer.serialize(bucket)?;
    }
    finish_csv(writer)
}

fn popular_csv(items: &[CategorySales]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for item in items {
        writer.serialize(item)?;
    }
    finish_csv(writer)
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer.into_inner().map_err(|e| {
        DashboardError::IoError(std::io::Error::new(
            std::io::ErrorKind::Other,
            e.to_string(),
        ))
    })
}
