pub const MIN_TTL: u64 = 60;
pub const MAX_TTL: u64 = 3600;
