pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no geometry supplied: a frame needs at least one point to bound")]
    EmptyInput,
}
