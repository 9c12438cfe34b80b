use serde::Deserialize;
use std::collections::HashMap;
use std::error::Error;

#[derive(Debug, Deserialize)]
pub struct AliasRecord {
    #[serde(rename = "Id")]
    pub id: u32,
    #[serde(rename = "Alias")]
    pub alias: String,
    #[serde(rename = "PersonId")]
    pub person_id: u32,
}

#[derive(Debug, Deserialize)]
pub struct PersonRecord {
    #[serde(rename = "Id")]
    pub id: u32,
    #[serde(rename = "Name")]
    pub name: String,
}

// Lookup tables mapping raw sender/recipient strings to canonical person
// names. Built once at startup and passed by reference to the pipeline.
pub struct IdentityResolver {
    aliases: HashMap<String, u32>,
    persons: HashMap<u32, String>,
}

impl IdentityResolver {
    pub fn new(aliases: HashMap<String, u32>, persons: HashMap<u32, String>) -> Self {
        IdentityResolver { aliases, persons }
    }

    pub fn from_csv(aliases_path: &str, persons_path: &str) -> Result<Self, Box<dyn Error>> {
        let mut aliases = HashMap::new();
        let mut reader = csv::Reader::from_path(aliases_path)?;
        for record in reader.deserialize() {
            let record: AliasRecord = record?;
            aliases.insert(record.alias, record.person_id);
        }

        let mut persons = HashMap::new();
        let mut reader = csv::Reader::from_path(persons_path)?;
        for record in reader.deserialize() {
            let record: PersonRecord = record?;
            persons.insert(record.id, record.name);
        }

        Ok(IdentityResolver { aliases, persons })
    }

    // Normalize a raw identity string: lowercase, drop commas and the domain
    // part of email addresses, then resolve through the alias table. Unknown
    // names pass through unchanged.
    pub fn resolve(&self, raw: &str) -> String {
        let name = raw.to_lowercase().replace(',', "");
        let name = name.split('@').next().unwrap_or_default().to_string();
        if let Some(person_id) = self.aliases.get(&name) {
            if let Some(canonical) = self.persons.get(person_id) {
                return canonical.clone();
            }
        }
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> IdentityResolver {
        let mut aliases = HashMap::new();
        aliases.insert("a1".to_string(), 100);
        aliases.insert("hillary".to_string(), 100);
        let mut persons = HashMap::new();
        persons.insert(100, "Alice Smith".to_string());
        IdentityResolver::new(aliases, persons)
    }

    #[test]
    fn test_alias_resolves_to_canonical_name() {
        let resolver = resolver();
        assert_eq!(resolver.resolve("A1"), "Alice Smith");
        assert_eq!(resolver.resolve("hillary@clintonemail.com"), "Alice Smith");
    }

    #[test]
    fn test_unknown_name_passes_through() {
        let resolver = resolver();
        assert_eq!(resolver.resolve("unknown@x.com"), "unknown");
        assert_eq!(resolver.resolve("Jake Sullivan"), "jake sullivan");
    }

    #[test]
    fn test_strips_commas_and_domain() {
        let resolver = resolver();
        assert_eq!(resolver.resolve("Clinton, Bill"), "clinton bill");
        assert_eq!(resolver.resolve("Mills, Cheryl@state.gov"), "mills cheryl");
    }

    #[test]
    fn test_empty_string_passes_through() {
        let resolver = resolver();
        assert_eq!(resolver.resolve(""), "");
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let resolver = resolver();
        for raw in ["A1", "unknown@x.com", "", "Clinton, Bill"] {
            assert_eq!(resolver.resolve(raw), resolver.resolve(raw));
        }
    }

    #[test]
    fn test_alias_without_person_entry_passes_through() {
        let mut aliases = HashMap::new();
        aliases.insert("h".to_string(), 1);
        let resolver = IdentityResolver::new(aliases, HashMap::new());
        assert_eq!(resolver.resolve("H"), "h");
    }
}
