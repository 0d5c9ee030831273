/// Numeric defaults shared across crates.
///
/// Duration assumed for an event whose end instant is absent. Keeps the
/// until-bound adjustment well defined for open-ended events.
pub const DEFAULT_MINIMAL_DURATION_SECS: u32 = 300;

/// Defensive cap on BYSETPOS resolver invocations within one expansion.
/// Termination never relies on this cap; it only bounds pathological
/// rules reaching the resolver.
pub const DEFAULT_SETPOS_SCAN_LIMIT: u32 = 1000;
