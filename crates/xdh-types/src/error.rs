/// Key-agreement operation errors.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("invalid scalar length: expected {expected}, got {got}")]
    InvalidScalarLength { expected: usize, got: usize },
    #[error("invalid coordinate length: expected {expected}, got {got}")]
    InvalidCoordinateLength { expected: usize, got: usize },
    #[error("random generation failed")]
    RandGenFail,
    #[error("shared secret is the point at infinity")]
    PointAtInfinity,
}
