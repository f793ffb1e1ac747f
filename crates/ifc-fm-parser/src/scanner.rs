// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fast entity scanner using SIMD-accelerated byte searching
//!
//! Scans IFC files to discover entities without full parsing.

use memchr::memchr;
use rustc_hash::FxHashMap;

/// Entity index mapping ID to byte offsets
pub type EntityIndex = FxHashMap<u32, (usize, usize)>;

/// Fast entity scanner for IFC files
///
/// Uses memchr for SIMD-accelerated scanning to quickly find entity
/// boundaries without full parsing.
pub struct EntityScanner<'a> {
    content: &'a str,
    pos: usize,
}

impl<'a> EntityScanner<'a> {
    /// Create a new scanner positioned after the `DATA;` marker
    ///
    /// Returns `None` when the content has no data section.
    pub fn new(content: &'a str) -> Option<Self> {
        let pos = data_section_start(content)?;
        Some(Self { content, pos })
    }

    /// Scan to find the next entity
    ///
    /// Returns (id, type_name, start_byte, end_byte)
    pub fn next_entity(&mut self) -> Option<(u32, &'a str, usize, usize)> {
        let bytes = self.content.as_bytes();

        while self.pos < bytes.len() {
            let hash_pos = memchr(b'#', &bytes[self.pos..])?;
            self.pos += hash_pos;

            // Definitions start a statement; references only occur inside one,
            // and find_entity_end always skips past the whole statement.
            let is_entity_start = self.pos == 0
                || matches!(bytes[self.pos - 1], b'\n' | b'\r' | b';' | b' ' | b'\t');

            if !is_entity_start {
                self.pos += 1;
                continue;
            }

            let start = self.pos;

            self.pos += 1; // Skip #
            let id_start = self.pos;

            while self.pos < bytes.len() && bytes[self.pos].is_ascii_digit() {
                self.pos += 1;
            }

            if self.pos == id_start {
                continue;
            }

            let id: u32 = match self.content[id_start..self.pos].parse() {
                Ok(id) => id,
                Err(_) => continue,
            };

            while self.pos < bytes.len() && (bytes[self.pos] == b' ' || bytes[self.pos] == b'\t') {
                self.pos += 1;
            }

            if self.pos >= bytes.len() || bytes[self.pos] != b'=' {
                continue;
            }
            self.pos += 1; // Skip =

            while self.pos < bytes.len() && (bytes[self.pos] == b' ' || bytes[self.pos] == b'\t') {
                self.pos += 1;
            }

            let type_start = self.pos;
            while self.pos < bytes.len()
                && (bytes[self.pos].is_ascii_alphanumeric() || bytes[self.pos] == b'_')
            {
                self.pos += 1;
            }

            if self.pos == type_start {
                continue;
            }

            let type_name = &self.content[type_start..self.pos];

            let end = self.find_entity_end()?;

            return Some((id, type_name, start, end));
        }

        None
    }

    /// Find the end of an entity (semicolon), handling quoted strings
    fn find_entity_end(&mut self) -> Option<usize> {
        let bytes = self.content.as_bytes();
        let mut in_string = false;

        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b'\'' => {
                    // Escaped quote ''
                    if in_string && self.pos + 1 < bytes.len() && bytes[self.pos + 1] == b'\'' {
                        self.pos += 2;
                        continue;
                    }
                    in_string = !in_string;
                }
                b';' if !in_string => {
                    self.pos += 1;
                    return Some(self.pos);
                }
                _ => {}
            }
            self.pos += 1;
        }

        None
    }

    /// Build an index of all entities (ID -> byte offsets)
    pub fn build_index(content: &'a str) -> EntityIndex {
        let mut index = FxHashMap::default();
        if let Some(mut scanner) = Self::new(content) {
            while let Some((id, _, start, end)) = scanner.next_entity() {
                index.insert(id, (start, end));
            }
        }
        index
    }
}

/// Byte offset just past the `DATA;` marker
fn data_section_start(content: &str) -> Option<usize> {
    content.find("DATA;").map(|p| p + 5)
}

/// Parse the header section to extract metadata
pub fn parse_header(content: &str) -> HeaderInfo {
    let mut info = HeaderInfo::default();

    let header_start = content.find("HEADER;").unwrap_or(0);
    let header_end = content[header_start..]
        .find("ENDSEC;")
        .map(|p| header_start + p)
        .unwrap_or(content.len());
    let header = &content[header_start..header_end];

    // FILE_SCHEMA(('IFC2X3')) - the first identifier is the one that counts
    if let Some(schema_start) = header.find("FILE_SCHEMA") {
        if let Some(paren_start) = header[schema_start..].find('(') {
            let start = schema_start + paren_start + 1;
            if let Some((schemas, _)) = parse_header_list(&header[start..]) {
                info.schema_version = schemas.first().cloned().unwrap_or_default();
            }
        }
    }

    // FILE_NAME(name, timestamp, (author), (organization), preprocessor, originating_system, authorization)
    if let Some(name_start) = header.find("FILE_NAME") {
        if let Some(paren_start) = header[name_start..].find('(') {
            let args = &header[name_start + paren_start + 1..];
            let mut fields = HeaderFields { rest: args };

            info.file_name = fields.next_string();
            info.timestamp = fields.next_string();
            info.author = fields.next_list().and_then(|l| l.first().cloned());
            info.organization = fields.next_list().and_then(|l| l.first().cloned());
            info.preprocessor_version = fields.next_string();
            info.originating_system = fields.next_string();
        }
    }

    info
}

/// Sequential reader over comma-separated header arguments
struct HeaderFields<'a> {
    rest: &'a str,
}

impl<'a> HeaderFields<'a> {
    fn skip_separator(&mut self) {
        let trimmed = self.rest.trim_start();
        self.rest = trimmed.strip_prefix(',').unwrap_or(trimmed);
    }

    fn next_string(&mut self) -> Option<String> {
        let (value, rest) = parse_header_string(self.rest)?;
        self.rest = rest;
        self.skip_separator();
        Some(value).filter(|v| !v.is_empty())
    }

    fn next_list(&mut self) -> Option<Vec<String>> {
        let (items, rest) = parse_header_list(self.rest)?;
        self.rest = rest;
        self.skip_separator();
        Some(items)
    }
}

/// Parse a string from header ('value')
fn parse_header_string(s: &str) -> Option<(String, &str)> {
    let s = s.trim_start();
    if !s.starts_with('\'') {
        if let Some(rest) = s.strip_prefix('$') {
            return Some((String::new(), rest));
        }
        return None;
    }

    let mut end = 1;
    let bytes = s.as_bytes();
    while end < bytes.len() {
        if bytes[end] == b'\'' {
            if end + 1 < bytes.len() && bytes[end + 1] == b'\'' {
                end += 2;
                continue;
            }
            break;
        }
        end += 1;
    }

    if end >= bytes.len() {
        return None;
    }

    let value = s[1..end].replace("''", "'");
    Some((value, &s[end + 1..]))
}

/// Parse a list from header (('value1', 'value2'))
fn parse_header_list(s: &str) -> Option<(Vec<String>, &str)> {
    let s = s.trim_start();
    let Some(mut current) = s.strip_prefix('(') else {
        // `$` or a bare string where a list was expected
        return parse_header_string(s).map(|(v, rest)| (vec![v], rest));
    };

    let mut items = Vec::new();

    loop {
        current = current.trim_start();
        if let Some(rest) = current.strip_prefix(')') {
            return Some((items, rest));
        }

        let (item, rest) = parse_header_string(current)?;
        if !item.is_empty() {
            items.push(item);
        }
        current = rest.trim_start();
        if let Some(rest) = current.strip_prefix(',') {
            current = rest;
        }
    }
}

/// Header information extracted from IFC file
#[derive(Clone, Debug, Default)]
pub struct HeaderInfo {
    pub schema_version: String,
    pub file_name: Option<String>,
    pub timestamp: Option<String>,
    pub author: Option<String>,
    pub organization: Option<String>,
    pub preprocessor_version: Option<String>,
    pub originating_system: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_IFC: &str = r#"ISO-10303-21;
HEADER;
FILE_DESCRIPTION(('ViewDefinition [CoordinationView]'),'2;1');
FILE_NAME('office.ifc','2024-01-01T00:00:00',('Facility Team'),('Org'),'Preprocessor','App','');
FILE_SCHEMA(('IFC4X3_ADD2'));
ENDSEC;
DATA;
#1=IFCPROJECT('0YvctVUKr0kugbFTf53O9L',$,'Project',$,$,$,$,$,#2);
#2=IFCUNITASSIGNMENT((#3));
#3=IFCSIUNIT(*,.LENGTHUNIT.,.MILLI.,.METRE.);
  #4= IFCSPACE('3cUkl32yn9qRSPvBJVyWYp',$,'Room; 101',$,$,$,$,$,.ELEMENT.,.INTERNAL.,$);
ENDSEC;
END-ISO-10303-21;
"#;

    #[test]
    fn test_scanner_finds_entities() {
        let mut scanner = EntityScanner::new(TEST_IFC).unwrap();
        let mut entities = Vec::new();

        while let Some((id, type_name, _, _)) = scanner.next_entity() {
            entities.push((id, type_name.to_string()));
        }

        assert_eq!(entities.len(), 4);
        assert_eq!(entities[0], (1, "IFCPROJECT".to_string()));
        assert_eq!(entities[3], (4, "IFCSPACE".to_string()));
    }

    #[test]
    fn test_semicolon_inside_string_does_not_split_entity() {
        let index = EntityScanner::build_index(TEST_IFC);
        let (start, end) = index[&4];
        assert!(TEST_IFC[start..end].ends_with(".INTERNAL.,$);"));
    }

    #[test]
    fn test_missing_data_section() {
        assert!(EntityScanner::new("ISO-10303-21;\nHEADER;\nENDSEC;\n").is_none());
        assert!(EntityScanner::build_index("not a step file").is_empty());
    }

    #[test]
    fn test_parse_header() {
        let info = parse_header(TEST_IFC);
        assert_eq!(info.schema_version, "IFC4X3_ADD2");
        assert_eq!(info.file_name.as_deref(), Some("office.ifc"));
        assert_eq!(info.author.as_deref(), Some("Facility Team"));
        assert_eq!(info.organization.as_deref(), Some("Org"));
        assert_eq!(info.originating_system.as_deref(), Some("App"));
    }

    #[test]
    fn test_parse_header_without_schema() {
        let info = parse_header("ISO-10303-21;\nHEADER;\nFILE_NAME('a.ifc',$,(''),(''),$,$,$);\nENDSEC;\nDATA;\nENDSEC;\n");
        assert!(info.schema_version.is_empty());
        assert_eq!(info.file_name.as_deref(), Some("a.ifc"));
        assert_eq!(info.timestamp, None);
    }
}
