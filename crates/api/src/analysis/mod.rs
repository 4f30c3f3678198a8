mod activity;
mod dates;
mod range;

pub use activity::*;
pub use dates::*;
pub use range::*;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("no observations recorded for any station")]
    EmptyStore,
    #[error("observations reference station {0} with no metadata row")]
    UnknownStation(String),
    #[error(transparent)]
    Store(#[from] crate::db::Error),
}
