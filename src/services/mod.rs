pub mod conversion;

pub use conversion::{
    compute_etag, encode_image, ConversionService, ConvertedImage, MAX_DIMENSION,
};
