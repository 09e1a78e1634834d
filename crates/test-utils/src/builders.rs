use serde_json::json;

/// Builder for one `cargo --message-format=json` artifact line.
pub struct BuildEventLine {
    target_name: String,
    test: bool,
    filenames: Vec<String>,
}

impl BuildEventLine {
    /// A `compiler-artifact` record for `target_name`, not a test build.
    pub fn artifact(target_name: &str) -> Self {
        Self {
            target_name: target_name.to_string(),
            test: false,
            filenames: Vec::new(),
        }
    }

    pub fn test(mut self, test: bool) -> Self {
        self.test = test;
        self
    }

    pub fn file(mut self, path: &str) -> Self {
        self.filenames.push(path.to_string());
        self
    }

    pub fn build(self) -> String {
        json!({
            "reason": "compiler-artifact",
            "package_id": format!("{} 0.1.0 (path+file:///src)", self.target_name),
            "target": { "kind": ["lib"], "name": self.target_name },
            "profile": { "opt_level": "3", "debuginfo": 0, "test": self.test },
            "features": [],
            "filenames": self.filenames,
            "fresh": false,
        })
        .to_string()
    }
}

/// A `build-finished` record, which names no library.
pub fn build_finished_line() -> String {
    json!({ "reason": "build-finished", "success": true }).to_string()
}
