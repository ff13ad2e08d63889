#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use facear_camera as camera;

#[doc(inline)]
pub use facear_tracking as tracking;

#[doc(inline)]
pub use facear_view as view;
