//! The strategy classifier.
//!
//! Pure function of two descriptors and the anchor direction. Evaluation
//! order encodes precedence: the sparse skip and the reverse-ownership
//! skip fire before any strategy is chosen.

use weft_catalog::{Backend, TypeDescriptor};

use crate::strategy::{Classified, CopyStrategy, DispatchEntry, SkipReason};

/// Which table a pair is being classified for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Destination-anchored table (`copy_`): iterating sources.
    Forward,
    /// Source-anchored reverse-entry table (`copy_from_`): iterating
    /// destinations.
    Reverse,
}

/// Classify one ordered (source, destination) pair.
///
/// The async strategies are direction-gated: an upload branch is only
/// emitted from the destination-anchored table, a download branch only from
/// the reverse-entry table. Accelerator→Host pairs never reach the forward
/// async arm because the ownership skip fires first.
pub fn classify<'a>(
    source: &'a TypeDescriptor,
    destination: &'a TypeDescriptor,
    direction: Direction,
) -> Classified<'a> {
    // Sparse copies are unimplemented; no case in either table.
    if source.is_sparse() || destination.is_sparse() {
        return Classified::Skip(SkipReason::Sparse);
    }

    // The reverse-entry path is the sole owner of Accelerator→Host.
    // Emitting it here too would generate duplicate, contradictory cases.
    if direction == Direction::Forward
        && source.backend == Backend::Accelerator
        && destination.backend == Backend::Host
    {
        return Classified::Skip(SkipReason::ReverseOwned);
    }

    // Any accelerator endpoint needs the execution-context handle.
    let requires_accel_state = source.backend == Backend::Accelerator
        || destination.backend == Backend::Accelerator;

    let same_scalar = source.scalar == destination.scalar;
    let strategy = match (source.backend, destination.backend) {
        (Backend::Host, Backend::Host) => CopyStrategy::DirectHostCopy,
        (Backend::Host, Backend::Accelerator)
            if same_scalar && direction == Direction::Forward =>
        {
            CopyStrategy::AsyncHostToAccel
        }
        (Backend::Accelerator, Backend::Host) if same_scalar => {
            CopyStrategy::AsyncAccelToHost
        }
        _ => CopyStrategy::NamedKernel,
    };

    Classified::Emit(DispatchEntry {
        source,
        destination,
        strategy,
        requires_accel_state,
    })
}
