pub struct Icons;

impl Icons {
    pub const NOTE: &str = "📝";
    pub const SEARCH: &str = "🔍";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const STATS: &str = "📊";
    pub const LINK: &str = "🔗";
    pub const DEL: &str = "🗑️";
    pub const EMPTY: &str = "∅";
    pub const GHOST: &str = "👻";
}
