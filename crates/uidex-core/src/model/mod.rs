// ── Domain model ──
//
// Catalog records as they appear in the dataset.

mod device;

pub use device::{
    DeviceImages, DeviceRecord, FALLBACK_IDENTIFIER, FALLBACK_LINE_ID, FALLBACK_LINE_NAME,
    FALLBACK_PRODUCT_NAME, LineRef, ProductRef,
};

pub(crate) use device::non_blank;
