use enough::Stop;

use crate::error::PnmError;
use crate::grid::PixelGrid;
use crate::info::ImageInfo;
use crate::limits::Limits;

/// Decode a complete PNM byte stream.
///
/// ```no_run
/// use zenpnm::{DecodeRequest, Limits, Unstoppable};
///
/// # let data: &[u8] = b"P2 1 1 255 7";
/// let limits = Limits::with_max_memory(64 << 20);
/// let grid = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// # Ok::<(), zenpnm::PnmError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Reject headers whose dimensions or decoded size exceed `limits`.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Parse the header only.
    pub fn info(&self) -> Result<ImageInfo, PnmError> {
        ImageInfo::from_bytes(self.data)
    }

    /// Decode header and raster into an owned grid.
    pub fn decode(self, stop: impl Stop) -> Result<PixelGrid, PnmError> {
        crate::pnm::decode(self.data, self.limits, &stop)
    }
}
