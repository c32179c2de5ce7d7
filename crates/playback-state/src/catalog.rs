//! Static name → URL catalogs for radio stations and video favorites.

use anyhow::{bail, Context};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Ordered name → URL mapping. Lookups are exact and case-sensitive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<(String, String)>,
}

impl Catalog {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut catalog = Self::default();
        for (name, url) in pairs {
            let name = name.into();
            if catalog.get(&name).is_none() {
                catalog.entries.push((name, url.into()));
            }
        }
        catalog
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, url)| url.as_str())
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(key, _)| key.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalogs {
    pub radio: Catalog,
    pub youtube: Catalog,
}

impl Default for Catalogs {
    fn default() -> Self {
        Self {
            radio: Catalog::from_pairs([
                ("SRF 1", "https://stream.srg-ssr.ch/m/drs1/mp3_128"),
                ("SRF 2 Kultur", "https://stream.srg-ssr.ch/m/drs2/mp3_128"),
                ("SRF 3", "https://stream.srg-ssr.ch/m/drs3/mp3_128"),
                ("SRF 4 News", "https://stream.srg-ssr.ch/m/drs4news/mp3_128"),
                ("Radio Swiss Jazz", "https://stream.srg-ssr.ch/m/rsj/mp3_128"),
                ("Radio Swiss Classic", "https://stream.srg-ssr.ch/m/rsc_de/mp3_128"),
                ("Radio Swiss Pop", "https://stream.srg-ssr.ch/m/rsp/mp3_128"),
                ("FM4", "https://orf-live.ors-shoutcast.at/fm4-q2a"),
                ("Ö1", "https://orf-live.ors-shoutcast.at/oe1-q2a"),
                ("Ö3", "https://orf-live.ors-shoutcast.at/oe3-q2a"),
                ("Bayern 3", "https://dispatcher.rndfnk.com/br/br3/live/mp3/mid"),
                (
                    "WDR 2",
                    "https://wdr-wdr2-rheinland.icecastssl.wdr.de/wdr/wdr2/rheinland/mp3/128/stream.mp3",
                ),
                (
                    "NDR 2",
                    "https://icecast.ndr.de/ndr/ndr2/niedersachsen/mp3/128/stream.mp3",
                ),
                (
                    "1LIVE",
                    "https://wdr-1live-live.icecastssl.wdr.de/wdr/1live/live/mp3/128/stream.mp3",
                ),
                (
                    "Klassik Radio",
                    "https://stream.klassikradio.de/live/mp3-192/stream.klassikradio.de/",
                ),
                ("Lounge FM", "http://stream.lounge.fm/loungefm-mp3-320"),
            ]),
            youtube: Catalog::from_pairs([
                ("Hillsong Worship 2h", "https://www.youtube.com/watch?v=ruI3dhJQamM"),
                ("Worship Songs 2h", "https://www.youtube.com/watch?v=wUm_WP6TH3o"),
                ("Hillsong Best 2024", "https://www.youtube.com/watch?v=_1HGZ_9aRhI"),
                ("Smooth Jazz", "https://www.youtube.com/watch?v=U3n31M81RpE"),
                ("Jazz Fusion 70s-80s", "https://www.youtube.com/watch?v=DMI2Xh6tIIQ"),
                ("Rare Jazz Fusion", "https://www.youtube.com/watch?v=Qw7vOfDLBiQ"),
                ("Indie Jazz Funk", "https://www.youtube.com/watch?v=DxVce5xunE4"),
            ]),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    radio: Option<Mapping>,
    #[serde(default)]
    youtube: Option<Mapping>,
}

fn catalog_from_mapping(section: &str, mapping: &Mapping) -> anyhow::Result<Catalog> {
    let mut pairs = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let (Value::String(name), Value::String(url)) = (key, value) else {
            bail!("{section}: entries must map a name to a URL string");
        };
        pairs.push((name.clone(), url.clone()));
    }
    Ok(Catalog::from_pairs(pairs))
}

/// Load catalogs from YAML with top-level `radio:` and `youtube:` maps.
///
/// A section missing from the file keeps the built-in default.
pub fn load_catalog_file(path: impl AsRef<Path>) -> anyhow::Result<Catalogs> {
    let path = path.as_ref();
    let raw =
        fs::read_to_string(path).with_context(|| format!("reading catalog: {}", path.display()))?;
    let file: CatalogFile =
        serde_yaml::from_str(&raw).with_context(|| format!("parsing yaml: {}", path.display()))?;

    let mut catalogs = Catalogs::default();
    if let Some(radio) = &file.radio {
        catalogs.radio = catalog_from_mapping("radio", radio)?;
    }
    if let Some(youtube) = &file.youtube {
        catalogs.youtube = catalog_from_mapping("youtube", youtube)?;
    }
    Ok(catalogs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        let catalogs = Catalogs::default();
        assert!(catalogs.radio.get("SRF 3").is_some());
        assert!(catalogs.radio.get("srf 3").is_none());
        assert!(catalogs.radio.get("SRF").is_none());
        assert_eq!(catalogs.radio.len(), 16);
        assert_eq!(catalogs.youtube.len(), 7);
    }

    #[test]
    fn names_keep_declaration_order() {
        let catalog = Catalog::from_pairs([("b", "1"), ("a", "2"), ("b", "3")]);
        assert_eq!(catalog.names(), vec!["b", "a"]);
        assert_eq!(catalog.get("b"), Some("1"));
    }

    #[test]
    fn file_overrides_sections_it_names() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(
            file,
            "radio:\n  Jazz Nacht: https://example.org/jazz.mp3\n  Talk: https://example.org/talk"
        )?;
        let catalogs = load_catalog_file(file.path())?;
        assert_eq!(catalogs.radio.names(), vec!["Jazz Nacht", "Talk"]);
        assert_eq!(catalogs.youtube, Catalogs::default().youtube);
        Ok(())
    }

    #[test]
    fn non_string_entries_are_rejected() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "youtube:\n  Broken: [1, 2]")?;
        assert!(load_catalog_file(file.path()).is_err());
        Ok(())
    }
}
