//! Database schema definitions

pub const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS Users (
    Username TEXT NOT NULL,
    Password TEXT NOT NULL
)
"#;

pub const CREATE_GPS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS GPS (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    Username TEXT NOT NULL,
    Latitude TEXT NOT NULL,
    Longitude TEXT NOT NULL,
    Time TEXT NOT NULL,
    SPD TEXT NOT NULL
)
"#;

// Time is integer seconds since epoch, assigned server-side
pub const CREATE_VIEWS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS views (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    BaseURL TEXT NOT NULL,
    Path TEXT NOT NULL,
    Time BIGINT NOT NULL
)
"#;

pub const CREATE_SMS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS sms (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    from_number TEXT NOT NULL,
    text TEXT NOT NULL,
    sentStamp TEXT NOT NULL,
    receiveStamp TEXT NOT NULL,
    sim TEXT NOT NULL
)
"#;

// Covering index for the window counts (BaseURL = ? AND Path = ? AND Time > ?)
pub const CREATE_INDEX_VIEWS_KEY_TIME: &str =
    "CREATE INDEX IF NOT EXISTS idx_views_key_time ON views(BaseURL, Path, Time)";

// For the whole-site aggregate (BaseURL = ?, any path)
pub const CREATE_INDEX_VIEWS_BASE: &str =
    "CREATE INDEX IF NOT EXISTS idx_views_base ON views(BaseURL)";

// For the credential lookup
pub const CREATE_INDEX_USERS_NAME: &str =
    "CREATE INDEX IF NOT EXISTS idx_users_name ON Users(Username)";
