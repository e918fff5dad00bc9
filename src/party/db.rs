//! Database operations for parties.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    party::{NewParty, Party, PartyId, PartyUpdate},
};

const SELECT_PARTY: &str = "SELECT id, name, phone, address, remark FROM party";

/// Validate `new_party`, insert it and return it with its generated ID.
///
/// # Errors
///
/// Returns [Error::MissingField] if the name, phone or address is blank, in
/// which case nothing is written.
pub fn create_party(new_party: &NewParty, connection: &Connection) -> Result<Party, Error> {
    let details = new_party.validate()?;

    connection.execute(
        "INSERT INTO party (name, phone, address, remark) VALUES (?1, ?2, ?3, ?4);",
        (
            &details.name,
            &details.phone,
            &details.address,
            &details.remark,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Party {
        id,
        name: details.name,
        phone: details.phone,
        address: details.address,
        remark: details.remark,
    })
}

/// Retrieve a single party by ID.
pub fn get_party(party_id: PartyId, connection: &Connection) -> Result<Party, Error> {
    connection
        .prepare(&format!("{SELECT_PARTY} WHERE id = :id;"))?
        .query_row(&[(":id", &party_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve the first party, by ID, whose name is exactly `name`.
///
/// Names are not unique, so any later parties with the same name are ignored.
pub fn find_party_by_name(name: &str, connection: &Connection) -> Result<Party, Error> {
    connection
        .prepare(&format!(
            "{SELECT_PARTY} WHERE name = :name ORDER BY id ASC LIMIT 1;"
        ))?
        .query_row(&[(":name", &name)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all parties in the order they were created.
pub fn get_all_parties(connection: &Connection) -> Result<Vec<Party>, Error> {
    connection
        .prepare(&format!("{SELECT_PARTY} ORDER BY id ASC;"))?
        .query_map([], map_row)?
        .map(|maybe_party| maybe_party.map_err(|error| error.into()))
        .collect()
}

/// Overwrite the phone, address and remark of the first party named
/// `update.name`. The name and ID are left unchanged.
///
/// # Errors
///
/// Returns [Error::MissingField] if the name, phone or address is blank and
/// [Error::UpdateMissingParty] if no party has the given name.
pub fn update_party(update: &PartyUpdate, connection: &Connection) -> Result<Party, Error> {
    let details = update.validate()?;

    let party = match find_party_by_name(&details.name, connection) {
        Ok(party) => party,
        Err(Error::NotFound) => return Err(Error::UpdateMissingParty),
        Err(error) => return Err(error),
    };

    connection.execute(
        "UPDATE party SET phone = ?1, address = ?2, remark = ?3 WHERE id = ?4",
        (&details.phone, &details.address, &details.remark, party.id),
    )?;

    Ok(Party {
        phone: details.phone,
        address: details.address,
        remark: details.remark,
        ..party
    })
}

/// Delete the party with both the given ID and name.
///
/// # Errors
///
/// Returns [Error::DeleteMissingParty] if no party matches both `party_id` and `name`.
pub fn delete_party(party_id: PartyId, name: &str, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM party WHERE id = ?1 AND name = ?2",
        (party_id, name),
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingParty);
    }

    Ok(())
}

/// Initialize the party table and indexes.
pub fn create_party_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS party (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            phone TEXT NOT NULL,
            address TEXT NOT NULL,
            remark TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_party_name ON party(name);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Party, rusqlite::Error> {
    Ok(Party {
        id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        address: row.get(3)?,
        remark: row.get(4)?,
    })
}


#[cfg(test)]
mod party_query_tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        party::{NewParty, Party, PartyUpdate},
    };

    use super::{
        create_party, create_party_table, delete_party, find_party_by_name, get_all_parties,
        get_party, update_party,
    };

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_party_table(&connection).expect("Could not create party table");
        connection
    }

    fn new_party(name: &str, phone: &str, address: &str) -> NewParty {
        NewParty {
            name: Some(name.to_owned()),
            phone: Some(phone.to_owned()),
            address: Some(address.to_owned()),
            remark: None,
        }
    }

    #[track_caller]
    fn must_create_party(name: &str, connection: &Connection) -> Party {
        create_party(&new_party(name, "555-0100", "1 Main Street"), connection)
            .expect("Could not create test party")
    }

    #[track_caller]
    fn count_parties(connection: &Connection) -> i64 {
        connection
            .query_row("SELECT COUNT(1) FROM party", [], |row| row.get(0))
            .expect("Could not count parties")
    }

    #[test]
    fn create_party_succeeds() {
        let connection = get_test_db_connection();

        let party = create_party(&new_party("Alice", "123", "Addr1"), &connection);

        let want = Party {
            id: 1,
            name: "Alice".to_owned(),
            phone: "123".to_owned(),
            address: "Addr1".to_owned(),
            remark: None,
        };
        assert_eq!(party, Ok(want.clone()));
        assert_eq!(find_party_by_name("Alice", &connection), Ok(want));
    }

    #[test]
    fn create_party_assigns_new_ids() {
        let connection = get_test_db_connection();

        let first = must_create_party("Alice", &connection);
        let second = must_create_party("Bob", &connection);

        assert!(first.id > 0);
        assert!(second.id > first.id);
    }

    #[test]
    fn create_party_stores_remark() {
        let connection = get_test_db_connection();
        let form = NewParty {
            remark: Some("pays on time".to_owned()),
            ..new_party("Alice", "123", "Addr1")
        };

        let party = create_party(&form, &connection).expect("Could not create test party");

        assert_eq!(get_party(party.id, &connection), Ok(party));
    }

    #[test]
    fn create_party_with_missing_field_writes_nothing() {
        let connection = get_test_db_connection();
        let forms = [
            NewParty {
                name: None,
                ..new_party("", "123", "Addr1")
            },
            NewParty {
                phone: None,
                ..new_party("Alice", "", "Addr1")
            },
            new_party("Alice", "123", ""),
        ];
        let want_errors = [
            Error::MissingField("name"),
            Error::MissingField("phone"),
            Error::MissingField("address"),
        ];

        for (form, want_error) in forms.iter().zip(want_errors) {
            assert_eq!(create_party(form, &connection), Err(want_error));
        }

        assert_eq!(count_parties(&connection), 0);
    }

    #[test]
    fn get_party_with_invalid_id_returns_not_found() {
        let connection = get_test_db_connection();
        let party = must_create_party("Alice", &connection);

        let selected = get_party(party.id + 123, &connection);

        assert_eq!(selected, Err(Error::NotFound));
    }

    #[test]
    fn find_party_by_name_returns_first_match() {
        let connection = get_test_db_connection();
        let first = must_create_party("Alice", &connection);
        must_create_party("Alice", &connection);

        let selected = find_party_by_name("Alice", &connection);

        assert_eq!(selected, Ok(first));
    }

    #[test]
    fn find_party_by_name_is_exact() {
        let connection = get_test_db_connection();
        must_create_party("Alice", &connection);

        assert_eq!(
            find_party_by_name("alice", &connection),
            Err(Error::NotFound)
        );
        assert_eq!(find_party_by_name("Ali", &connection), Err(Error::NotFound));
    }

    #[test]
    fn get_all_parties_in_creation_order() {
        let connection = get_test_db_connection();
        let want = vec![
            must_create_party("Carol", &connection),
            must_create_party("Alice", &connection),
            must_create_party("Bob", &connection),
        ];

        let got = get_all_parties(&connection).expect("Could not get all parties");

        assert_eq!(got, want);
    }

    #[test]
    fn get_all_parties_is_repeatable() {
        let connection = get_test_db_connection();
        must_create_party("Alice", &connection);
        must_create_party("Bob", &connection);

        let first = get_all_parties(&connection).unwrap();
        let second = get_all_parties(&connection).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn get_all_parties_on_empty_table() {
        let connection = get_test_db_connection();

        assert_eq!(get_all_parties(&connection), Ok(vec![]));
    }

    #[test]
    fn update_party_changes_contact_details_only() {
        let connection = get_test_db_connection();
        let party = must_create_party("Alice", &connection);
        let update = PartyUpdate {
            name: Some("Alice".to_owned()),
            phone: Some("456".to_owned()),
            address: Some("Addr2".to_owned()),
            remark: Some("moved".to_owned()),
        };

        let updated = update_party(&update, &connection).expect("Could not update party");

        let want = Party {
            id: party.id,
            name: party.name,
            phone: "456".to_owned(),
            address: "Addr2".to_owned(),
            remark: Some("moved".to_owned()),
        };
        assert_eq!(updated, want);
        assert_eq!(find_party_by_name("Alice", &connection), Ok(want));
    }

    #[test]
    fn update_party_can_clear_remark() {
        let connection = get_test_db_connection();
        let party = create_party(
            &NewParty {
                remark: Some("old note".to_owned()),
                ..new_party("Alice", "123", "Addr1")
            },
            &connection,
        )
        .unwrap();
        let update = PartyUpdate {
            name: Some("Alice".to_owned()),
            phone: Some("123".to_owned()),
            address: Some("Addr1".to_owned()),
            remark: None,
        };

        update_party(&update, &connection).expect("Could not update party");

        let got = get_party(party.id, &connection).unwrap();
        assert_eq!(got.remark, None);
    }

    #[test]
    fn update_party_only_touches_first_match() {
        let connection = get_test_db_connection();
        must_create_party("Alice", &connection);
        let duplicate = must_create_party("Alice", &connection);
        let update = PartyUpdate {
            name: Some("Alice".to_owned()),
            phone: Some("456".to_owned()),
            address: Some("Addr2".to_owned()),
            remark: None,
        };

        update_party(&update, &connection).expect("Could not update party");

        assert_eq!(get_party(duplicate.id, &connection), Ok(duplicate));
    }

    #[test]
    fn update_party_with_unknown_name_returns_error() {
        let connection = get_test_db_connection();
        let update = PartyUpdate {
            name: Some("Nobody".to_owned()),
            phone: Some("456".to_owned()),
            address: Some("Addr2".to_owned()),
            remark: None,
        };

        let result = update_party(&update, &connection);

        assert_eq!(result, Err(Error::UpdateMissingParty));
    }

    #[test]
    fn delete_party_succeeds() {
        let connection = get_test_db_connection();
        let party = must_create_party("Alice", &connection);
        let other = must_create_party("Bob", &connection);

        let result = delete_party(party.id, "Alice", &connection);

        assert!(result.is_ok());
        assert_eq!(get_all_parties(&connection), Ok(vec![other]));
    }

    #[test]
    fn delete_party_with_mismatched_name_changes_nothing() {
        let connection = get_test_db_connection();
        let party = must_create_party("Alice", &connection);

        let result = delete_party(party.id, "Bob", &connection);

        assert_eq!(result, Err(Error::DeleteMissingParty));
        assert_eq!(get_all_parties(&connection), Ok(vec![party]));
    }

    #[test]
    fn delete_party_with_invalid_id_returns_error() {
        let connection = get_test_db_connection();
        let party = must_create_party("Alice", &connection);

        let result = delete_party(party.id + 1, "Alice", &connection);

        assert_eq!(result, Err(Error::DeleteMissingParty));
        assert_eq!(count_parties(&connection), 1);
    }
}
