//! Field access shared by list views and export adapters

/// A row that can be addressed by column key
pub trait Record {
    /// Value of a plain field, if the record has it
    fn value(&self, key: &str) -> Option<String>;

    /// A related sub-record, e.g. `Owner` in `Owner.Email`
    fn related(&self, _name: &str) -> Option<&dyn Record> {
        None
    }
}

/// Resolve a possibly dotted key (`Relation.Field`) against a record
pub fn lookup(record: &dyn Record, key: &str) -> Option<String> {
    match key.split_once('.') {
        Some((relation, rest)) => record
            .related(relation)
            .and_then(|related| lookup(related, rest)),
        None => record.value(key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Owner {
        email: String,
    }

    impl Record for Owner {
        fn value(&self, key: &str) -> Option<String> {
            (key == "Email").then(|| self.email.clone())
        }
    }

    struct Page {
        title: String,
        owner: Owner,
    }

    impl Record for Page {
        fn value(&self, key: &str) -> Option<String> {
            (key == "Title").then(|| self.title.clone())
        }

        fn related(&self, name: &str) -> Option<&dyn Record> {
            match name {
                "Owner" => Some(&self.owner),
                _ => None,
            }
        }
    }

    #[test]
    fn test_lookup_follows_relations() {
        let page = Page {
            title: "Home".into(),
            owner: Owner {
                email: "owner@example.com".into(),
            },
        };

        assert_eq!(lookup(&page, "Title").as_deref(), Some("Home"));
        assert_eq!(lookup(&page, "Owner.Email").as_deref(), Some("owner@example.com"));
        assert_eq!(lookup(&page, "Owner.Missing"), None);
        assert_eq!(lookup(&page, "Author.Email"), None);
    }
}
