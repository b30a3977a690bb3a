//! Common test utilities and helpers

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Interface records rendered through the packaged collection template
pub const INTERFACES_YAML: &str = r#"
- interface: Gi1/1
  description: Customer A
  vid: 100
  ip: 10.0.0.1
  mask: 255.255.255.0
  vrf: cust_a
  template: ttr://interfaces.cisco_ios.txt
  device: rt-1
- interface: Gi1/2
  description: Customer C
  vid: 300
  ip: 10.0.3.1
  mask: 255.255.255.0
  vrf: cust_c
  template: ttr://interfaces.cisco_ios.txt
  device: rt-1
- interface: Gi1/2
  description: Customer B
  vid: 200
  ip: 10.0.2.1
  mask: 255.255.255.0
  vrf: cust_b
  template: ttr://interfaces.cisco_ios.txt
  device: rt-2
"#;

pub const RT1_INTERFACES: &str = "interface Gi1/1
 description Customer A
 encapsulation dot1q 100
 vrf forwarding  cust_a
 ip address 10.0.0.1 255.255.255.0
 exit
!
interface Gi1/2
 description Customer C
 encapsulation dot1q 300
 vrf forwarding  cust_c
 ip address 10.0.3.1 255.255.255.0
 exit
!";

pub const RT2_INTERFACES: &str = "interface Gi1/2
 description Customer B
 encapsulation dot1q 200
 vrf forwarding  cust_b
 ip address 10.0.2.1 255.255.255.0
 exit
!";

/// Path of a committed test fixture
///
/// - `links.xlsx`: `interfaces` data tab, `#drafts` tab, `vlans` tab without a
///   template column, `templates` tab with `interface` and `logging`
/// - `templates.xlsx`: `#old templates` tab, `Device Templates` tab with
///   `hostname` and `ntp`
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Temporary directory laid out the way the CLI expects: Data/, Templates/, Output/
pub struct Workspace {
    temp_dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for dir in ["Data", "Templates"] {
            fs::create_dir_all(temp_dir.path().join(dir)).expect("Failed to create dir");
        }
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.path().join("Data")
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.path().join("Templates")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.path().join("Output")
    }

    /// Write `content` to `relative`, creating parent directories
    pub fn with_file(self, relative: impl AsRef<Path>, content: &str) -> Self {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write file");
        self
    }

    /// Copy fixture `name` to `relative`
    pub fn with_fixture(self, name: &str, relative: impl AsRef<Path>) -> Self {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::copy(fixture(name), &path).expect("Failed to copy fixture");
        self
    }

    pub fn read(&self, relative: impl AsRef<Path>) -> String {
        fs::read_to_string(self.path().join(relative)).expect("Failed to read file")
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}
