use thiserror::Error;

use crate::{GroupKey, MAX_ORDER, MIN_ORDER};

/// Error returned by an operation on a cube.
#[allow(missing_docs)]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CubeError {
    #[error("cube order {0} is outside the supported range {MIN_ORDER}..={MAX_ORDER}")]
    OrderOutOfRange(u16),
    #[error("cannot hold {0} while another group is held")]
    Locked(GroupKey),
    #[error("unknown notation {0:?}")]
    UnknownNotation(String),
}
