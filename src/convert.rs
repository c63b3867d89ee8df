//! Enum and status translation between the caller-facing and runtime conventions
//!
//! Forward mappings (caller → runtime) are total and implemented with `From`.
//! Reverse mappings fail with [`Error::InvalidEnum`] on runtime-only values.

use crate::error::{Error, Result, Status};
use crate::runtime::{RtEform, RtEvect, RtFill, RtOperation, RtSide, RtStatus, RtStorev, RtSvect};
use crate::types::{EigMode, EigType, FillMode, Operation, SideMode, SvdJob};

impl From<Operation> for RtOperation {
    fn from(op: Operation) -> Self {
        match op {
            Operation::N => Self::None,
            Operation::T => Self::Transpose,
            Operation::C => Self::ConjugateTranspose,
        }
    }
}

impl TryFrom<RtOperation> for Operation {
    type Error = Error;

    fn try_from(op: RtOperation) -> Result<Self> {
        Ok(match op {
            RtOperation::None => Self::N,
            RtOperation::Transpose => Self::T,
            RtOperation::ConjugateTranspose => Self::C,
        })
    }
}

impl From<FillMode> for RtFill {
    fn from(fill: FillMode) -> Self {
        match fill {
            FillMode::Upper => Self::Upper,
            FillMode::Lower => Self::Lower,
        }
    }
}

impl TryFrom<RtFill> for FillMode {
    type Error = Error;

    fn try_from(fill: RtFill) -> Result<Self> {
        match fill {
            RtFill::Upper => Ok(Self::Upper),
            RtFill::Lower => Ok(Self::Lower),
            RtFill::Full => Err(Error::invalid_enum("RtFill", fill as i32)),
        }
    }
}

impl From<SideMode> for RtSide {
    fn from(side: SideMode) -> Self {
        match side {
            SideMode::Left => Self::Left,
            SideMode::Right => Self::Right,
        }
    }
}

impl TryFrom<RtSide> for SideMode {
    type Error = Error;

    fn try_from(side: RtSide) -> Result<Self> {
        match side {
            RtSide::Left => Ok(Self::Left),
            RtSide::Right => Ok(Self::Right),
            RtSide::Both => Err(Error::invalid_enum("RtSide", side as i32)),
        }
    }
}

impl From<SideMode> for RtStorev {
    /// Q reflectors are stored column-wise, P reflectors row-wise
    fn from(side: SideMode) -> Self {
        match side {
            SideMode::Left => Self::ColumnWise,
            SideMode::Right => Self::RowWise,
        }
    }
}

impl TryFrom<RtStorev> for SideMode {
    type Error = Error;

    fn try_from(storev: RtStorev) -> Result<Self> {
        Ok(match storev {
            RtStorev::ColumnWise => Self::Left,
            RtStorev::RowWise => Self::Right,
        })
    }
}

impl From<EigMode> for RtEvect {
    fn from(mode: EigMode) -> Self {
        match mode {
            EigMode::NoVector => Self::None,
            EigMode::Vector => Self::Original,
        }
    }
}

impl TryFrom<RtEvect> for EigMode {
    type Error = Error;

    fn try_from(evect: RtEvect) -> Result<Self> {
        match evect {
            RtEvect::None => Ok(Self::NoVector),
            RtEvect::Original => Ok(Self::Vector),
            RtEvect::Tridiagonal => Err(Error::invalid_enum("RtEvect", evect as i32)),
        }
    }
}

impl From<EigType> for RtEform {
    fn from(itype: EigType) -> Self {
        match itype {
            EigType::Type1 => Self::Ax,
            EigType::Type2 => Self::Abx,
            EigType::Type3 => Self::Bax,
        }
    }
}

impl TryFrom<RtEform> for EigType {
    type Error = Error;

    fn try_from(eform: RtEform) -> Result<Self> {
        Ok(match eform {
            RtEform::Ax => Self::Type1,
            RtEform::Abx => Self::Type2,
            RtEform::Bax => Self::Type3,
        })
    }
}

impl From<SvdJob> for RtSvect {
    fn from(job: SvdJob) -> Self {
        match job {
            SvdJob::All => Self::All,
            SvdJob::Singular => Self::Singular,
            SvdJob::Overwrite => Self::Overwrite,
            SvdJob::None => Self::None,
        }
    }
}

impl TryFrom<RtSvect> for SvdJob {
    type Error = Error;

    fn try_from(svect: RtSvect) -> Result<Self> {
        Ok(match svect {
            RtSvect::All => Self::All,
            RtSvect::Singular => Self::Singular,
            RtSvect::Overwrite => Self::Overwrite,
            RtSvect::None => Self::None,
        })
    }
}

/// Singular-vector job for the Jacobi SVD: all vectors, or the thin set when `econ`
pub fn svect_for(mode: EigMode, econ: bool) -> RtSvect {
    match (mode, econ) {
        (EigMode::NoVector, _) => RtSvect::None,
        (EigMode::Vector, true) => RtSvect::Singular,
        (EigMode::Vector, false) => RtSvect::All,
    }
}

/// Caller-facing status for a runtime status
///
/// The size-query outcomes count as success; statuses without a caller-facing
/// counterpart become [`Status::Unknown`].
pub fn status_from_runtime(status: RtStatus) -> Status {
    match status {
        RtStatus::Success | RtStatus::SizeIncreased | RtStatus::SizeUnchanged => Status::Success,
        RtStatus::InvalidHandle => Status::NotInitialized,
        RtStatus::NotImplemented => Status::NotSupported,
        RtStatus::InvalidPointer | RtStatus::InvalidSize | RtStatus::InvalidValue => {
            Status::InvalidValue
        }
        RtStatus::MemoryError => Status::AllocFailed,
        RtStatus::InternalError => Status::InternalError,
        _ => Status::Unknown,
    }
}

/// Argument class a runtime rejection refers to
fn rejected_argument(status: RtStatus) -> &'static str {
    match status {
        RtStatus::InvalidPointer => "pointer",
        RtStatus::InvalidSize => "size",
        _ => "value",
    }
}

/// Error for a runtime status that is not success-like
pub fn error_from_runtime(status: RtStatus) -> Error {
    routine_error("runtime", status)
}

/// Error for a status returned by `routine`
///
/// The runtime does not say which argument it rejected, only whether it was a
/// pointer, a size or some other value; that class becomes the argument name
/// and the routine goes into the reason.
pub fn routine_error(routine: &'static str, status: RtStatus) -> Error {
    match status_from_runtime(status) {
        Status::NotInitialized => Error::NotInitialized,
        Status::NotSupported => Error::NotSupported { feature: routine },
        Status::InvalidValue => Error::invalid_value(
            rejected_argument(status),
            format!("{routine} rejected its arguments ({status:?})"),
        ),
        Status::AllocFailed => Error::AllocFailed { bytes: 0 },
        Status::InternalError => Error::internal(format!("{routine} reported {status:?}")),
        _ => Error::Unknown {
            code: status.code(),
        },
    }
}

/// Check-and-propagate helper for runtime calls
#[inline]
pub fn check(status: RtStatus) -> Result<()> {
    check_routine("runtime", status)
}

/// [`check`] for a status returned by a named routine
pub fn check_routine(routine: &'static str, status: RtStatus) -> Result<()> {
    if status.is_success_like() {
        Ok(())
    } else {
        tracing::warn!(routine, ?status, "runtime call failed");
        Err(routine_error(routine, status))
    }
}
