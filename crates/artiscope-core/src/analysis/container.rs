//! Executable container analysis.
//!
//! Header facts (bitness, fat layout, slice count) come straight from the
//! leading bytes. Load-command facts come from a textual structure dump
//! produced by a [`StructureDumper`].

use std::path::Path;

use tracing::debug;

use crate::detect::classify::read_sample;
use crate::detect::magic::FAT_CIGAM;
use crate::detect::magic::FAT_CIGAM_64;
use crate::detect::magic::FAT_MAGIC;
use crate::detect::magic::FAT_MAGIC_64;
use crate::detect::magic::MH_CIGAM;
use crate::detect::magic::MH_CIGAM_64;
use crate::detect::magic::MH_MAGIC;
use crate::detect::magic::MH_MAGIC_64;
use crate::tools::StructureDumper;
use crate::types::ContainerRecord;
use crate::types::container_record::ARCH_ARM;
use crate::types::container_record::ARCH_ARM64;
use crate::types::container_record::ARCH_UNIVERSAL;

const HEADER_LEN: usize = 8;

/// Facts extracted from a structure dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StructureFacts {
    /// An `LC_ENCRYPTION_INFO` or `LC_ENCRYPTION_INFO_64` command is present.
    pub has_encryption: bool,
    /// The header flags include `PIE`.
    pub is_position_independent: bool,
    /// Number of `Load command N` entries.
    pub load_command_count: u32,
    /// The cpu subtype is arm64e.
    pub is_arm64e: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Thin32,
    Thin64,
    Fat,
}

impl Layout {
    fn from_magic(magic: [u8; 4]) -> Option<Self> {
        match magic {
            MH_MAGIC | MH_CIGAM => Some(Self::Thin32),
            MH_MAGIC_64 | MH_CIGAM_64 => Some(Self::Thin64),
            FAT_MAGIC | FAT_MAGIC_64 | FAT_CIGAM | FAT_CIGAM_64 => Some(Self::Fat),
            _ => None,
        }
    }
}

/// Analyzes the executable container at `path`.
///
/// Unrecognized, short or unreadable input yields
/// [`ContainerRecord::invalid`]. The dumper is only consulted for
/// recognized containers; if it fails, the four dump-derived facts default
/// to false/0 and the header facts are still reported.
///
/// # Examples
///
/// ```no_run
/// use artiscope_core::analysis::analyze_container;
/// use artiscope_core::tools::NoStructureDumper;
///
/// let record = analyze_container("Payload/App.app/App", &NoStructureDumper);
/// println!("{} ({} slices)", record.architecture_summary, record.architecture_count);
/// ```
pub fn analyze_container<P: AsRef<Path>>(path: P, dumper: &dyn StructureDumper) -> ContainerRecord {
    let path = path.as_ref();

    let header = match read_sample(path, HEADER_LEN) {
        Ok(header) => header,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "container unreadable");
            return ContainerRecord::invalid();
        }
    };

    let Some(layout) = header
        .first_chunk::<4>()
        .and_then(|magic| Layout::from_magic(*magic))
    else {
        debug!(path = %path.display(), "no container magic");
        return ContainerRecord::invalid();
    };

    let (is_64_bit, summary, architecture_count) = match layout {
        Layout::Thin32 => (false, ARCH_ARM, 1),
        Layout::Thin64 => (true, ARCH_ARM64, 1),
        Layout::Fat => (true, ARCH_UNIVERSAL, fat_arch_count(&header)),
    };

    let facts = match dumper.dump(path) {
        Ok(text) => parse_structure_dump(&text),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "structure dump unavailable");
            StructureFacts::default()
        }
    };

    ContainerRecord {
        is_valid: true,
        is_64_bit,
        is_arm64e: facts.is_arm64e,
        architecture_count,
        architecture_summary: summary.to_string(),
        has_encryption: facts.has_encryption,
        is_position_independent: facts.is_position_independent,
        load_command_count: facts.load_command_count,
    }
}

/// Reads the slice count from bytes 4..8 of a fat header as a big-endian
/// u32, whichever byte order the magic used. A missing or zero count reads
/// as 1.
fn fat_arch_count(header: &[u8]) -> u32 {
    header
        .get(4..8)
        .and_then(|bytes| <[u8; 4]>::try_from(bytes).ok())
        .map_or(0, u32::from_be_bytes)
        .max(1)
}

/// Extracts load-command facts from structure-dump text.
///
/// The arm64e subtype is only looked for in header lines, never inside a
/// load command, so a dylib path mentioning `arm64e` does not count.
///
/// # Examples
///
/// ```
/// use artiscope_core::analysis::parse_structure_dump;
///
/// let facts = parse_structure_dump(concat!(
///     "flags NOUNDEFS DYLDLINK TWOLEVEL PIE\n",
///     "Load command 0\n cmd LC_SEGMENT_64\n",
///     "Load command 1\n cmd LC_ENCRYPTION_INFO_64\n",
/// ));
/// assert!(facts.is_position_independent);
/// assert!(facts.has_encryption);
/// assert_eq!(facts.load_command_count, 2);
/// ```
#[must_use]
pub fn parse_structure_dump(text: &str) -> StructureFacts {
    let mut facts = StructureFacts::default();
    let mut load_commands = 0usize;
    let mut in_load_command = false;

    for line in text.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("Load command ") {
            load_commands += 1;
            in_load_command = true;
            continue;
        }
        if trimmed.starts_with("Mach header") || trimmed.ends_with("):") {
            in_load_command = false;
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        facts.has_encryption |= trimmed.contains("LC_ENCRYPTION_INFO");
        facts.is_position_independent |= !in_load_command && tokens.contains(&"PIE");
        facts.is_arm64e |= !in_load_command && header_names_arm64e(&tokens);
    }

    facts.load_command_count = u32::try_from(load_commands).unwrap_or(u32::MAX);
    facts
}

/// `ARM64 E` in the tabular header, or an `arm64e` word such as
/// `(architecture arm64e):`.
fn header_names_arm64e(tokens: &[&str]) -> bool {
    tokens.windows(2).any(|w| w[0] == "ARM64" && w[1] == "E")
        || tokens.iter().any(|token| {
            token
                .trim_matches(|c: char| !c.is_ascii_alphanumeric())
                .eq_ignore_ascii_case("arm64e")
        })
}
