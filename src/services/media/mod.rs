pub mod client;
pub mod cloudinary;

pub use client::{
    ListQuery, MediaError, MediaHost, MediaPage, MediaResult, MediaUpload, UnconfiguredMediaHost,
    UploadedMedia,
};
pub use cloudinary::CloudinaryHost;
