//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so
//! release builds stay quiet. Every flag is further gated by
//! `cfg(debug_assertions)` at the call site.

pub struct DebugFlags {
    /// Log each pivot a detector confirms or replaces.
    pub print_pivot_trace: bool,
    /// Log the candidate lists produced by ZigZag stage A.
    pub print_zigzag_candidates: bool,
    /// Log how far each value-area sweep went.
    pub print_value_area_sweep: bool,
    /// Log the wall time of each batch run.
    pub print_batch_timings: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_pivot_trace: false,
    print_zigzag_candidates: false,
    print_value_area_sweep: false,
    print_batch_timings: false,
};
