pub fn default_initial_capacity() -> usize {
    1024
}

pub fn default_log_format() -> String {
    "pretty".to_string()
}

pub fn default_log_filter() -> String {
    "info".to_string()
}

pub fn default_metrics_port() -> u16 {
    9090
}
