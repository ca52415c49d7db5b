//! Test fixtures: in-memory zip archives and application packages.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::fmt::Write as _;
use std::io::Cursor;
use std::io::Write;

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Creates an in-memory ZIP archive from a list of entries.
///
/// Each entry is a tuple of (path, content). Files are stored uncompressed
/// with mode 0o644.
///
/// # Examples
///
/// ```
/// use artiscope_core::test_utils::create_test_zip;
///
/// let zip_data = create_test_zip(vec![("file.txt", b"hello"), ("dir/nested.txt", b"world")]);
/// assert!(zip_data.starts_with(b"PK\x03\x04"));
/// ```
#[must_use]
pub fn create_test_zip(entries: Vec<(&str, &[u8])>) -> Vec<u8> {
    entries
        .into_iter()
        .fold(ZipTestBuilder::new(), |builder, (path, data)| {
            builder.add_file(path, data)
        })
        .build()
}

/// Builder for ZIP test archives with files and directories.
///
/// # Examples
///
/// ```
/// use artiscope_core::test_utils::ZipTestBuilder;
///
/// let zip_data = ZipTestBuilder::new()
///     .add_file("file.txt", b"content")
///     .add_directory("dir/")
///     .build();
/// ```
pub struct ZipTestBuilder {
    zip: ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipTestBuilder {
    /// Creates a new ZIP test builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds a regular file with mode 0o644.
    #[must_use]
    pub fn add_file(self, path: &str, data: &[u8]) -> Self {
        self.add_file_with_mode(path, data, 0o644)
    }

    /// Adds a regular file with a custom mode.
    #[must_use]
    pub fn add_file_with_mode(mut self, path: &str, data: &[u8], mode: u32) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .unix_permissions(mode);

        self.zip.start_file(path, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a deflate-compressed regular file with mode 0o644.
    #[must_use]
    pub fn add_deflated_file(mut self, path: &str, data: &[u8]) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);

        self.zip.start_file(path, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a directory entry.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        let options = SimpleFileOptions::default().unix_permissions(0o755);
        self.zip.add_directory(path, options).unwrap();
        self
    }

    /// Builds and returns the ZIP archive data.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.zip.finish().unwrap().into_inner()
    }
}

impl Default for ZipTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders an XML property list whose root dictionary holds string values.
///
/// # Examples
///
/// ```
/// use artiscope_core::test_utils::info_plist_xml;
///
/// let xml = info_plist_xml(&[("CFBundleIdentifier", "com.example.demo")]);
/// assert!(xml.contains("<key>CFBundleIdentifier</key>"));
/// ```
#[must_use]
pub fn info_plist_xml(entries: &[(&str, &str)]) -> String {
    let mut xml = String::from(concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
        "<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" ",
        "\"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n",
        "<plist version=\"1.0\">\n<dict>\n",
    ));
    for (key, value) in entries {
        writeln!(xml, "  <key>{key}</key>\n  <string>{value}</string>").unwrap();
    }
    xml.push_str("</dict>\n</plist>\n");
    xml
}

/// Builder for zip-based application packages laid out as
/// `Payload/<name>.app/...`.
///
/// # Examples
///
/// ```
/// use artiscope_core::test_utils::IpaTestBuilder;
///
/// let ipa = IpaTestBuilder::new("Demo")
///     .info(&[("CFBundleIdentifier", "com.example.demo")])
///     .executable("Demo")
///     .provisioning()
///     .build();
/// assert!(ipa.starts_with(b"PK"));
/// ```
pub struct IpaTestBuilder {
    bundle: String,
    info: Option<String>,
    executable: Option<String>,
    provisioning: bool,
}

impl IpaTestBuilder {
    /// Starts a package whose bundle directory is `Payload/<name>.app`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            bundle: format!("Payload/{name}.app"),
            info: None,
            executable: None,
            provisioning: false,
        }
    }

    /// Adds an `Info.plist` with the given string entries.
    #[must_use]
    pub fn info(mut self, entries: &[(&str, &str)]) -> Self {
        self.info = Some(info_plist_xml(entries));
        self
    }

    /// Adds an `Info.plist` with raw content.
    #[must_use]
    pub fn raw_info(mut self, content: &str) -> Self {
        self.info = Some(content.to_string());
        self
    }

    /// Adds a 64-bit executable named `name` inside the bundle.
    #[must_use]
    pub fn executable(mut self, name: &str) -> Self {
        self.executable = Some(name.to_string());
        self
    }

    /// Adds `embedded.mobileprovision` to the bundle.
    #[must_use]
    pub fn provisioning(mut self) -> Self {
        self.provisioning = true;
        self
    }

    /// Builds and returns the package bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        let mut zip = ZipTestBuilder::new()
            .add_directory("Payload/")
            .add_directory(&format!("{}/", self.bundle));

        if let Some(info) = &self.info {
            zip = zip.add_file(&format!("{}/Info.plist", self.bundle), info.as_bytes());
        }
        if let Some(name) = &self.executable {
            zip = zip.add_file_with_mode(
                &format!("{}/{name}", self.bundle),
                &[0xCF, 0xFA, 0xED, 0xFE, 0x0C, 0x00, 0x00, 0x01],
                0o755,
            );
        }
        if self.provisioning {
            zip = zip.add_file(
                &format!("{}/embedded.mobileprovision", self.bundle),
                b"0\x82\x00\x00",
            );
        }
        zip.build()
    }
}
