use serde::Serialize;
use std::path::Path;

fn write_to_json<T: Serialize + ?Sized>(
    value: &T,
    path: impl AsRef<Path>,
) -> Result<(), &'static str> {
    let cached_json = serde_json::to_string_pretty(&value).map_err(|_| "Serialization error")?;
    std::fs::write(path.as_ref(), cached_json).map_err(|_| "File writing error")
}

fn write_to_csv<T: Serialize>(values: &[T], path: impl AsRef<Path>) -> Result<(), &'static str> {
    let file = std::fs::File::create(path.as_ref()).map_err(|_| "Output file not found")?;
    let mut writer = csv::Writer::from_writer(file);
    values
        .iter()
        .try_for_each(|val| writer.serialize(val))
        .map_err(|_| "Failed to serialize row")?;
    writer.flush().map_err(|_| "File writing error")
}

/// Writes `values` as JSON or CSV according to the file extension, logging the outcome.
pub fn try_write_slice_to_file<T: Serialize>(values: &[T], path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    let write_res = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => write_to_json(values, path),
        Some("csv") => write_to_csv(values, path),
        _ => Err("Invalid or missing filename extension"),
    };
    match write_res {
        Ok(()) => {
            tracing::info!("Successfully wrote to {:?}", path);
            true
        }
        Err(msg) => {
            tracing::error!("WARNING: failed write to {:?} because {}", path, msg);
            false
        }
    }
}
