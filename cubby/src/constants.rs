//! Endpoint addresses, protocol constants and environment variable names.

/// The REST API version segment prefixed to every path.
pub const API_VERSION: &str = "1";

/// Server address for authentication and metadata operations.
pub const API_HOST: &str = "api.cubby.io";

/// Server address for file content operations.
pub const CONTENT_HOST: &str = "content.cubby.io";

/// Default root collection that scopes metadata and content paths.
pub const DEFAULT_ROOT: &str = "sandbox";

/// Default language sent with every request.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default chunk size for chunked uploads, in MiB.
pub const DEFAULT_CHUNK_SIZE_MIB: u32 = 4;

/// Largest allowed chunk size (and single-shot upload size), in MiB.
pub const MAX_CHUNK_SIZE_MIB: u32 = 150;

// Environment variable names read by `Config::from_env`.
pub const CUBBY_APP_KEY: &str = "CUBBY_APP_KEY";
pub const CUBBY_APP_SECRET: &str = "CUBBY_APP_SECRET";
pub const CUBBY_ACCESS_KEY: &str = "CUBBY_ACCESS_KEY";
pub const CUBBY_ACCESS_SECRET: &str = "CUBBY_ACCESS_SECRET";
pub const CUBBY_LANGUAGE: &str = "CUBBY_LANGUAGE";
