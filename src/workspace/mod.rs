//! Workspace sizing and layout
//!
//! Every routine family describes the scratch it needs as a
//! [`WorkspaceLayout`]: the runtime routine's own scratch (the *base* region,
//! learned by a dry run) followed by the auxiliary arrays this layer adds on
//! top, in a fixed order. Both the size query and the execute path derive
//! offsets from the same layout, so a buffer of the queried size is always
//! carved identically.
//!
//! ```text
//! caller buffer (lwork bytes)
//! ┌──────────────────────────┬──────────┬──────────┬─────┐
//! │ base (runtime workspace) │ aux[0]   │ aux[1]   │ ... │
//! └──────────────────────────┴──────────┴──────────┴─────┘
//!   align_down(total - aux)    span(0)    span(1)
//! ```

mod provider;

pub use provider::ProvidedWorkspace;

use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::runtime::DevicePtr;
use smallvec::SmallVec;

/// Alignment of every region carved out of a workspace
pub const WORKSPACE_ALIGNMENT: usize = 64;

#[inline]
fn align_up(bytes: usize) -> Option<usize> {
    bytes.checked_next_multiple_of(WORKSPACE_ALIGNMENT)
}

#[inline]
const fn align_down(bytes: usize) -> usize {
    bytes / WORKSPACE_ALIGNMENT * WORKSPACE_ALIGNMENT
}

/// Role of an auxiliary array
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AuxKind {
    /// Off-diagonal (E) array of a bidiagonal or tridiagonal form
    OffDiagonal,
    /// Buffer receiving V^H before it is transposed into the caller's V
    VCopy,
    /// Jacobi residual(s)
    Residual,
    /// Jacobi sweep count(s)
    Sweeps,
}

/// One auxiliary array: `count` elements of `dtype`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AuxArray {
    /// Role
    pub kind: AuxKind,
    /// Element type
    pub dtype: DType,
    /// Element count
    pub count: usize,
}

impl AuxArray {
    /// Exact byte size
    pub fn bytes(&self) -> Result<usize> {
        self.count
            .checked_mul(self.dtype.size_in_bytes())
            .ok_or_else(|| self.overflow())
    }

    /// Byte size rounded up to [`WORKSPACE_ALIGNMENT`]
    pub fn span(&self) -> Result<usize> {
        align_up(self.bytes()?).ok_or_else(|| self.overflow())
    }

    fn overflow(&self) -> Error {
        tracing::warn!(kind = ?self.kind, count = self.count, "auxiliary array size overflows");
        Error::internal(format!(
            "{:?} array of {} {} elements overflows the address space",
            self.kind, self.count, self.dtype
        ))
    }
}

/// Product of element counts, failing on overflow
pub fn element_count(routine: &'static str, factors: &[usize]) -> Result<usize> {
    factors
        .iter()
        .try_fold(1usize, |acc, &f| acc.checked_mul(f))
        .ok_or_else(|| {
            tracing::warn!(routine, ?factors, "workspace element count overflows");
            Error::internal(format!("{routine}: element count {factors:?} overflows"))
        })
}

/// Ordered auxiliary arrays of one routine invocation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkspaceLayout {
    routine: &'static str,
    aux: SmallVec<[AuxArray; 4]>,
}

impl WorkspaceLayout {
    /// Layout with no auxiliary arrays
    pub fn new(routine: &'static str) -> Self {
        Self {
            routine,
            aux: SmallVec::new(),
        }
    }

    /// Append an auxiliary array
    pub fn with(mut self, kind: AuxKind, dtype: DType, count: usize) -> Self {
        self.aux.push(AuxArray { kind, dtype, count });
        self
    }

    /// Name of the runtime routine this layout belongs to
    pub fn routine(&self) -> &'static str {
        self.routine
    }

    /// Auxiliary arrays in placement order
    pub fn aux(&self) -> &[AuxArray] {
        &self.aux
    }

    /// Per-array spans, in placement order
    pub fn aux_spans(&self) -> Result<SmallVec<[usize; 4]>> {
        self.aux.iter().map(AuxArray::span).collect()
    }

    /// Bytes the auxiliary arrays occupy together
    pub fn aux_bytes(&self) -> Result<usize> {
        self.aux.iter().try_fold(0usize, |total, array| {
            total.checked_add(array.span()?).ok_or_else(|| {
                Error::internal(format!("{}: auxiliary arrays overflow", self.routine))
            })
        })
    }

    /// Span of the first array of `kind`, zero if the layout has none
    pub fn span_of(&self, kind: AuxKind) -> Result<usize> {
        self.aux
            .iter()
            .find(|a| a.kind == kind)
            .map_or(Ok(0), AuxArray::span)
    }

    /// Place the regions inside a buffer of `total` bytes
    ///
    /// The auxiliary arrays go at the aligned end of the buffer; whatever
    /// precedes them is the base region handed to the runtime.
    pub fn plan(&self, total: usize) -> Result<WorkspacePlan> {
        let aux_bytes = self.aux_bytes()?;
        if total < aux_bytes {
            return Err(Error::invalid_value(
                "lwork",
                format!(
                    "{} needs at least {aux_bytes} workspace bytes, got {total}",
                    self.routine
                ),
            ));
        }
        let base_bytes = align_down(total - aux_bytes);
        let mut offsets = SmallVec::new();
        let mut offset = base_bytes;
        for array in &self.aux {
            offsets.push(offset);
            offset += array.span()?;
        }
        Ok(WorkspacePlan {
            base_bytes,
            offsets,
        })
    }
}

/// Byte offsets of the regions of one workspace
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkspacePlan {
    /// Size of the base region, which starts at offset 0
    pub base_bytes: usize,
    /// Offset of each auxiliary array, in layout order
    pub offsets: SmallVec<[usize; 4]>,
}

/// Caller-supplied scratch buffer
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Workspace {
    /// Start of the buffer
    pub ptr: DevicePtr<u8>,
    /// Length in bytes
    pub bytes: usize,
}

impl Workspace {
    /// A buffer of `bytes` bytes at `ptr`; `None` when either is empty
    pub fn new(ptr: DevicePtr<u8>, bytes: usize) -> Option<Self> {
        if ptr.is_null() || bytes == 0 {
            None
        } else {
            Some(Self { ptr, bytes })
        }
    }

    /// Interpret a raw `(work, lwork)` argument pair
    pub fn from_raw(ptr: DevicePtr<u8>, lwork: i64) -> Result<Option<Self>> {
        let bytes = usize::try_from(lwork)
            .map_err(|_| Error::invalid_value("lwork", format!("negative size {lwork}")))?;
        Ok(Self::new(ptr, bytes))
    }
}

/// Narrow a byte count to the 32-bit `lwork` of the legacy entry points
pub fn narrow_lwork(bytes: usize) -> Result<i32> {
    i32::try_from(bytes).map_err(|_| {
        tracing::warn!(bytes, "workspace size exceeds the 32-bit lwork range");
        Error::internal(format!("workspace of {bytes} bytes does not fit in i32"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gesvdj_layout() -> WorkspaceLayout {
        WorkspaceLayout::new("gesvdj")
            .with(AuxKind::VCopy, DType::F64, 9)
            .with(AuxKind::Residual, DType::F64, 1)
            .with(AuxKind::Sweeps, DType::I32, 1)
    }

    #[test]
    fn test_spans_are_aligned() {
        let layout = gesvdj_layout();
        assert_eq!(layout.aux_spans().unwrap().as_slice(), &[128, 64, 64]);
        assert_eq!(layout.aux_bytes().unwrap(), 256);
        assert_eq!(layout.span_of(AuxKind::Residual).unwrap(), 64);
        assert_eq!(layout.span_of(AuxKind::OffDiagonal).unwrap(), 0);
    }

    #[test]
    fn test_plan_places_aux_after_base() {
        let layout = gesvdj_layout();
        let plan = layout.plan(1024 + 256).unwrap();
        assert_eq!(plan.base_bytes, 1024);
        assert_eq!(plan.offsets.as_slice(), &[1024, 1152, 1216]);

        // Oversized buffers keep every region aligned
        let plan = layout.plan(1024 + 256 + 10).unwrap();
        assert_eq!(plan.base_bytes, 1024);
    }

    #[test]
    fn test_plan_rejects_short_buffer() {
        let err = gesvdj_layout().plan(255).unwrap_err();
        assert!(matches!(err, Error::InvalidValue { arg: "lwork", .. }));
    }

    #[test]
    fn test_zero_count_contributes_nothing() {
        let layout = WorkspaceLayout::new("gesvdj").with(AuxKind::VCopy, DType::F32, 0);
        assert_eq!(layout.aux_bytes().unwrap(), 0);
        assert_eq!(layout.plan(128).unwrap().base_bytes, 128);
    }

    #[test]
    fn test_oversized_arrays_are_internal_errors() {
        let huge =
            WorkspaceLayout::new("gesvdj").with(AuxKind::VCopy, DType::Complex128, usize::MAX / 8);
        assert_eq!(
            huge.aux_bytes().unwrap_err().status(),
            crate::error::Status::InternalError
        );
        assert!(huge.plan(usize::MAX).is_err());

        // Rounding up to the alignment can overflow on its own
        let edge = WorkspaceLayout::new("gesvdj").with(AuxKind::Sweeps, DType::I32, usize::MAX / 4);
        assert!(edge.aux_spans().is_err());

        // Each span fits, their sum does not
        let pair = WorkspaceLayout::new("gesvdj")
            .with(AuxKind::Residual, DType::I32, usize::MAX / 8)
            .with(AuxKind::Sweeps, DType::I32, usize::MAX / 8);
        assert!(pair.aux_spans().is_ok());
        assert!(pair.aux_bytes().is_err());
    }

    #[test]
    fn test_element_count() {
        assert_eq!(element_count("gesvd", &[3, 4, 5]).unwrap(), 60);
        assert_eq!(element_count("gesvd", &[]).unwrap(), 1);
        let err = element_count("gesvdj", &[65536, 65536, i32::MAX as usize, 2]).unwrap_err();
        assert_eq!(err.status(), crate::error::Status::InternalError);
    }

    #[test]
    fn test_workspace_from_raw() {
        let p = DevicePtr::from_addr(0x1000);
        assert_eq!(
            Workspace::from_raw(p, 64).unwrap(),
            Some(Workspace { ptr: p, bytes: 64 })
        );
        assert_eq!(Workspace::from_raw(p, 0).unwrap(), None);
        assert_eq!(Workspace::from_raw(DevicePtr::null(), 64).unwrap(), None);
        assert!(Workspace::from_raw(p, -1).is_err());
    }

    #[test]
    fn test_narrow_lwork() {
        assert_eq!(narrow_lwork(4096).unwrap(), 4096);
        assert_eq!(narrow_lwork(i32::MAX as usize).unwrap(), i32::MAX);
        assert_eq!(
            narrow_lwork(i32::MAX as usize + 1).unwrap_err().status(),
            crate::error::Status::InternalError
        );
    }
}
