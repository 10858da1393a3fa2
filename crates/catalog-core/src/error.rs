use thiserror::Error;

use catalog_ingest::IngestError;
use catalog_map::MappingError;
use catalog_output::OutputError;
use catalog_variants::VariantError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Variant(#[from] VariantError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("no file loaded")]
    NoDataset,

    #[error("no source column is mapped to the manufacturer field '{0}'")]
    NoManufacturerColumn(String),
}
