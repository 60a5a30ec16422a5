/// JSON-RPC protocol version used by the request envelope.
pub const JSONRPC_VERSION: &str = "2.0";

/// Key of the envelope form of a roster: `{ "employees": [...] }`.
pub const ROSTER_ENVELOPE_KEY: &str = "employees";

/// Level of a root employee.
pub const ROOT_LEVEL: usize = 0;

/// User-facing message for a reassignment that would close a loop.
pub const CIRCULAR_REPORTING_MESSAGE: &str =
    "Invalid assignment: Cannot create circular reporting structure";

/// Attempts at minting a fresh identifier before giving up.
pub const MAX_ID_GENERATION_ATTEMPTS: u32 = 8;

// ── JSON-RPC error codes ──

pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;
/// Application error: the addressed employee does not exist.
pub const EMPLOYEE_NOT_FOUND: i32 = -32004;
/// Application error: the write was refused by the engine.
pub const WRITE_REFUSED: i32 = -32010;
