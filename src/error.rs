use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("expected 12 distortion polynomial coefficients but got: {count}")]
    PolyCoefficients { count: usize },
    #[error("expected positive sensor resolution but got: {x_res}x{y_res}")]
    Resolution { x_res: u32, y_res: u32 },
    #[error("expected positive plate scale but got: {f_scale}")]
    PlateScale { f_scale: f64 },
    #[error("track contains no detection points")]
    EmptyTrack,
    #[error("track timestamps decrease at index {index}")]
    UnorderedTrack { index: usize },
    #[error("track spans zero time; angular velocity is undefined")]
    ZeroDuration,
}
