use std::io::{Cursor, Read, Write};

use tracing::debug;
use url::Url;

use crate::errors::{Error, Result};

/// Name endings of the simplified chinese variant of a subtitle
const SUFFIXES: [&str; 2] = ["简体.srt", "chs.srt"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchiveKind {
    Zip,
    Rar,
}

impl ArchiveKind {
    /// Picks the archive reader from the extension of `url`
    pub fn from_url(url: &str) -> Result<Self> {
        let path = Url::parse(url)
            .map(|u| u.path().to_lowercase())
            .unwrap_or_else(|_| url.to_lowercase());

        if path.ends_with(".zip") {
            Ok(ArchiveKind::Zip)
        } else if path.ends_with(".rar") {
            Ok(ArchiveKind::Rar)
        } else {
            Err(Error::UnrecognizedArchive(url.to_string()))
        }
    }

    /// Content of the first simplified chinese subtitle, line endings fixed
    pub fn extract(self, data: &[u8]) -> Result<Option<Vec<u8>>> {
        let content = match self {
            ArchiveKind::Zip => extract_zip(data)?,
            ArchiveKind::Rar => extract_rar(data)?,
        };

        Ok(content.map(|c| fix_line_endings(&c)))
    }
}

pub fn is_simplified_chinese(name: &str) -> bool {
    SUFFIXES.iter().any(|s| name.ends_with(s))
}

/// Converts `\r\n` and lone `\r` line endings to `\n`
pub fn fix_line_endings(content: &[u8]) -> Vec<u8> {
    let mut fixed = Vec::with_capacity(content.len());
    let mut bytes = content.iter().peekable();

    while let Some(&b) = bytes.next() {
        if b == b'\r' {
            if bytes.peek() == Some(&&b'\n') {
                bytes.next();
            }
            fixed.push(b'\n');
        } else {
            fixed.push(b);
        }
    }

    fixed
}

fn extract_zip(data: &[u8]) -> Result<Option<Vec<u8>>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.is_dir() || !is_simplified_chinese(entry.name()) {
            continue;
        }

        debug!(name = entry.name(), "Found subtitle in zip");

        // the declared size comes from the remote archive
        let mut content = Vec::new();
        entry.read_to_end(&mut content)?;

        return Ok(Some(content));
    }

    Ok(None)
}

/// The rar reader only works on paths, so the archive goes through a temp file
fn extract_rar(data: &[u8]) -> Result<Option<Vec<u8>>> {
    let mut file = tempfile::Builder::new().suffix(".rar").tempfile()?;
    file.write_all(data)?;
    file.flush()?;

    let mut archive = unrar::Archive::new(file.path()).open_for_processing()?;
    while let Some(header) = archive.read_header()? {
        let entry = header.entry();
        let name = entry.filename.to_string_lossy().into_owned();

        archive = if entry.is_file() && is_simplified_chinese(&name) {
            debug!(name, "Found subtitle in rar");

            let (content, _) = header.read()?;
            return Ok(Some(content));
        } else {
            header.skip()?
        };
    }

    Ok(None)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use zip::write::SimpleFileOptions;

    /// Stored rar holding `subs/`, `subs/release.cht.srt`, `subs/release.简体.srt`
    /// and `subs/other.chs.srt`, in this order
    pub const SUBS_RAR: &[u8] = b"Rar!\x1a\x07\x00\xcf\x90s\x00\x00\x0d\x00\x00\x00\x00\x00\x00\x00\xca\
    \x14t\xe0\x80$\x00\x00\x00\x00\x00\x00\x00\x00\x00\x03\x00\x00\x00\x00\
    \x00`AG\x140\x04\x00\xedA\x00\x00subs\x0bct\x00\x804\x00\x08\x00\x00\x00\
    \x08\x00\x00\x00\x03\xca\x82\xf9\x9c\x00`AG\x140\x14\x00\xa4\x81\x00\x00\
    subs/release.cht.srt\xe7\xb9\x81\xe9\xab\x94\x0d\x0aF\xfbt\x00\x82`\x00*\
    \x00\x00\x00*\x00\x00\x00\x03x\xe1\xfd|\x00`AG\x140@\x00\xa4\x81\x00\x00\
    subs/release.??.srt\x00\x00\xaas\x00u\x00b\x00s\x00\xaa/\x00r\x00e\x00l\
    \x00\xaae\x00a\x00s\x00e\x00\xaa.\x00\x80{SO.\x00\xaas\x00r\x00t\x001\
    \x0d\x0a00:00:01,000\x20-->\x2000:00:02,000\x0d\x0a\xe4\xbd\xa0\xe5\xa5\
    \xbd\x0d\x0a\xd1\xe0t\x00\x802\x00\x06\x00\x00\x00\x06\x00\x00\x00\x03i\
    \x11\x1f\xb6\x00`AG\x140\x12\x00\xa4\x81\x00\x00subs/other.chs.srtsecond\
    \xc4={\x00@\x07\x00";

    pub fn build_zip(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

        for (name, data) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data.as_bytes()).unwrap();
        }

        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_archive_kind() {
        let kind = ArchiveKind::from_url("http://dl.subhd.com/sub/2015/10/144.zip").unwrap();
        assert_eq!(kind, ArchiveKind::Zip);

        let kind = ArchiveKind::from_url("http://dl.subhd.com/sub/2015/10/144.RAR?k=1").unwrap();
        assert_eq!(kind, ArchiveKind::Rar);

        let url = "http://dl.subhd.com/sub/2015/10/144.7z";
        match ArchiveKind::from_url(url) {
            Err(Error::UnrecognizedArchive(u)) => assert_eq!(u, url),
            res => panic!("unexpected result {res:?}"),
        }
    }

    #[test]
    fn test_is_simplified_chinese() {
        assert!(is_simplified_chinese("release.chs.srt"));
        assert!(is_simplified_chinese("dir/权力的游戏.简体.srt"));
        assert!(!is_simplified_chinese("release.cht.srt"));
        assert!(!is_simplified_chinese("release.繁体.srt"));
        assert!(!is_simplified_chinese("release.chs.ass"));
    }

    #[test]
    fn test_fix_line_endings() {
        assert_eq!(fix_line_endings(b"1\r\n2\r\n"), b"1\n2\n");
        assert_eq!(fix_line_endings(b"a\rb\n"), b"a\nb\n");
        assert_eq!(fix_line_endings(b"\r\r\n"), b"\n\n");
        assert_eq!(fix_line_endings(b"\n\r"), b"\n\n");
        assert!(fix_line_endings(b"").is_empty());
    }

    #[test]
    fn test_extract_zip() {
        let data = build_zip(&[
            ("release.cht.srt", "traditional\r\n"),
            ("release.chs.srt", "1\r\n00:00:01,000 --> 00:00:02,000\r\n"),
            ("other.chs.srt", "second"),
        ]);

        let content = ArchiveKind::Zip.extract(&data).unwrap();
        assert_eq!(content.unwrap(), b"1\n00:00:01,000 --> 00:00:02,000\n");
    }

    #[test]
    fn test_extract_zip_carriage_returns() {
        let data = build_zip(&[("a.chs.srt", "1\r00:00:01,000 --> 00:00:02,000\rx\r")]);

        let content = ArchiveKind::Zip.extract(&data).unwrap().unwrap();
        assert!(!content.contains(&b'\r'));
        assert_eq!(content, b"1\n00:00:01,000 --> 00:00:02,000\nx\n");
    }

    #[test]
    fn test_extract_rar() {
        let content = ArchiveKind::Rar.extract(SUBS_RAR).unwrap();

        assert_eq!(
            content.unwrap(),
            "1\n00:00:01,000 --> 00:00:02,000\n你好\n".as_bytes()
        );
    }

    #[test]
    fn test_extract_corrupted_rar() {
        let data = build_zip(&[("release.chs.srt", "x")]);
        assert!(matches!(ArchiveKind::Rar.extract(&data), Err(Error::Rar(_))));
    }

    #[test]
    fn test_extract_zip_without_match() {
        let data = build_zip(&[("release.eng.srt", "english")]);

        assert_eq!(ArchiveKind::Zip.extract(&data).unwrap(), None);
    }

    #[test]
    fn test_extract_corrupted_zip() {
        let res = ArchiveKind::Zip.extract(b"not a zip");

        assert!(matches!(res, Err(Error::Zip(_))));
    }
}
