//! Output partitions and their file names.

use depthsweep_core::ModelId;
use derive_getters::Getters;
use std::path::PathBuf;

/// One slice of output: a model swept at one temperature.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct Partition {
    model: ModelId,
    temperature: f32,
}

impl Partition {
    /// Create a partition.
    pub fn new(model: ModelId, temperature: f32) -> Self {
        Self { model, temperature }
    }
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} t={}",
            self.model.short_name(),
            temperature_label(self.temperature)
        )
    }
}

/// Temperature as it appears in file names.
///
/// Integral temperatures print without a fractional part.
///
/// # Examples
///
/// ```
/// use depthsweep_storage::temperature_label;
///
/// assert_eq!(temperature_label(0.0), "0");
/// assert_eq!(temperature_label(1.0), "1");
/// assert_eq!(temperature_label(0.7), "0.7");
/// ```
pub fn temperature_label(temperature: f32) -> String {
    if temperature.is_finite() && temperature.fract() == 0.0 {
        format!("{}", temperature as i64)
    } else {
        format!("{}", temperature)
    }
}

/// Where partition files live and how they are named.
///
/// Files are named `<model short name>_<suffix>_t=<temperature>.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PartitionLayout {
    dir: PathBuf,
    suffix: String,
}

impl PartitionLayout {
    /// Create a layout rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>, suffix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            suffix: suffix.into(),
        }
    }

    /// File name for a partition.
    pub fn file_name(&self, partition: &Partition) -> String {
        format!(
            "{}_{}_t={}.csv",
            partition.model.short_name(),
            self.suffix,
            temperature_label(partition.temperature)
        )
    }

    /// Full path for a partition.
    pub fn path_for(&self, partition: &Partition) -> PathBuf {
        self.dir.join(self.file_name(partition))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_for_gguf_model() {
        let layout = PartitionLayout::new("/out", "annotations_mop");
        let partition = Partition::new(
            ModelId::new("/models/llama.cpp_models/Meta-Llama-3-8B-Instruct-f16.gguf"),
            1.0,
        );
        assert_eq!(
            layout.path_for(&partition),
            PathBuf::from("/out/Meta-Llama-3-8B-Instruct-f16_annotations_mop_t=1.csv")
        );
    }

    #[test]
    fn test_file_name_for_hub_model() {
        let layout = PartitionLayout::new("out", "annotations_mop");
        let partition = Partition::new(ModelId::new("meta-llama/Llama-3-8B"), 0.0);
        assert_eq!(
            layout.file_name(&partition),
            "meta-llama--Llama-3-8B_annotations_mop_t=0.csv"
        );
    }

    #[test]
    fn test_temperatures_produce_distinct_files() {
        let layout = PartitionLayout::new("out", "a");
        let model = ModelId::new("m.gguf");
        let cold = layout.file_name(&Partition::new(model.clone(), 0.0));
        let warm = layout.file_name(&Partition::new(model, 0.5));
        assert_ne!(cold, warm);
        assert_eq!(warm, "m_a_t=0.5.csv");
    }
}
