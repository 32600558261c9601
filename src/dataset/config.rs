pub struct Config {
    pub entrances_file_name: String,
    pub lines_file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            entrances_file_name: "entrances.txt".into(),
            lines_file_name: "lines.txt".into(),
        }
    }
}
