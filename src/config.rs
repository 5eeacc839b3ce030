//! Default configuration constants for the crane3d dynamics core.

/// Gravitational acceleration (m/s²), acting along negative Z.
pub const DEFAULT_GRAVITY: f64 = 9.81;

/// Mass of the payload hanging on the lift-line.
pub const DEFAULT_PAYLOAD_MASS: f64 = 1.0;

/// Mass of the cart travelling along the rail.
pub const DEFAULT_CART_MASS: f64 = 1.155;

/// Mass of the moving rail.
pub const DEFAULT_RAIL_MASS: f64 = 2.2;

/// Viscous friction coefficient of the rail axis.
pub const DEFAULT_RAIL_FRICTION: f64 = 100.0;

/// Viscous friction coefficient of the cart axis.
pub const DEFAULT_CART_FRICTION: f64 = 82.0;

/// Viscous friction coefficient of the lift-line winch.
pub const DEFAULT_WINDING_FRICTION: f64 = 75.0;

/// Static coefficient of dry steel-on-steel friction.
pub const DEFAULT_STATIC_DRY_FRICTION: f64 = 0.7;

/// Kinetic coefficient of dry steel-on-steel friction.
pub const DEFAULT_KINETIC_DRY_FRICTION: f64 = 0.6;

pub const DEFAULT_RAIL_LIMITS: [f64; 2] = [-30.0, 30.0];
pub const DEFAULT_CART_LIMITS: [f64; 2] = [-35.0, 35.0];
pub const DEFAULT_LINE_LIMITS: [f64; 2] = [5.0, 90.0];

/// Initial lift-line length. Sits on the default lower line limit.
pub const DEFAULT_LINE_LENGTH: f64 = 5.0;

/// Angular damping (1/s) of the linearized pendulum formulations.
pub const DEFAULT_SWING_DAMPING: f64 = 0.2;

/// Residual velocities and angles below this magnitude are snapped to rest.
pub const DEFAULT_REST_THRESHOLD: f64 = 1e-9;

/// Speed under which an axis is considered stuck for dry friction purposes.
pub const STICTION_VELOCITY: f64 = 1e-4;

/// Lower bound for `|cos α|` in the non-linear swing equations.
pub const MIN_SWING_COSINE: f64 = 1e-3;

/// Sub-steps in a single update above which a warning is logged.
pub const DEFAULT_SUBSTEP_WARN_THRESHOLD: u64 = 1_000;

/// Relative slack, in units of the fixed step, under which banked time
/// still counts as a full step. Absorbs rounding in `elapsed / step`.
pub const STEP_TOLERANCE: f64 = 1e-9;

/// Largest sub-step count one update may request. Beyond 2^53 the banked
/// time can no longer be reduced by a single step.
pub const MAX_SUBSTEPS_PER_UPDATE: u64 = 1 << 53;
