// Integrity invariants checked against a real store
// Sequences of commands are generated or scripted, then the tables are inspected

use agency_core::model::{EntityId, EntityKind, Field, FieldValue, NewAgent, NewSalary};
use agency_core::Command;
use agency_engine::apply_command;
use agency_engine::commands::integrity::{cascade_delete, try_link_salary};
use agency_engine::run_script_text;
use agency_store::db::open_in_memory_migrated;
use proptest::prelude::*;
use rusqlite::Connection;

fn count(conn: &Connection, sql: &str) -> i64 {
    conn.query_row(sql, [], |r| r.get(0)).unwrap()
}

fn benefit_matches_experience(conn: &Connection) -> bool {
    let mismatches = count(
        conn,
        "SELECT COUNT(*) FROM Agents a
         WHERE (a.Experience >= 10) != EXISTS (SELECT 1 FROM AgentBenefit b WHERE b.AgentID = a.AgentID)",
    );
    let extra = count(
        conn,
        "SELECT COUNT(*) FROM (SELECT AgentID FROM AgentBenefit GROUP BY AgentID HAVING COUNT(*) > 1)",
    );
    mismatches == 0 && extra == 0
}

fn set_experience(conn: &Connection, agent: i64, experience: i64) {
    apply_command(
        conn,
        Command::Update {
            kind: EntityKind::Agent,
            id: EntityId::from_raw(agent),
            field: Field::Experience,
            value: FieldValue::Int(experience),
        },
    )
    .unwrap();
}

proptest! {
    #[test]
    fn prop_benefit_tracks_experience(
        initial in 0i64..25,
        updates in prop::collection::vec((1i64..4, 0i64..25), 0..12),
    ) {
        let conn = open_in_memory_migrated().unwrap();
        for i in 0..3 {
            apply_command(&conn, Command::RegisterAgent(NewAgent {
                name: format!("A{}", i),
                phone: "1".into(),
                experience: initial + i,
            })).unwrap();
            prop_assert!(benefit_matches_experience(&conn));
        }
        for (agent, experience) in updates {
            set_experience(&conn, agent, experience);
            prop_assert!(benefit_matches_experience(&conn));
        }
        // Every benefit row is owned through a link
        prop_assert_eq!(
            count(&conn, "SELECT COUNT(*) FROM WorkBenefits"),
            count(&conn, "SELECT COUNT(*) FROM AgentBenefit")
        );
    }

    #[test]
    fn prop_agent_never_links_two_salaries(
        attempts in prop::collection::vec((1i64..4, 1i64..6), 1..20),
    ) {
        let conn = open_in_memory_migrated().unwrap();
        for amount in 1..=5 {
            apply_command(&conn, Command::RegisterSalary {
                salary: NewSalary { amount: amount * 1000, experience: amount },
                link_agent: None,
            }).unwrap();
        }
        for (agent, salary) in attempts {
            try_link_salary(&conn, EntityId::from_raw(agent), EntityId::from_raw(salary)).unwrap();
        }
        prop_assert_eq!(
            count(&conn, "SELECT COUNT(*) FROM (SELECT AgentID FROM AgentSalary GROUP BY AgentID HAVING COUNT(*) > 1)"),
            0
        );
    }
}

#[test]
fn test_experience_update_crossing_threshold_both_ways() {
    let conn = open_in_memory_migrated().unwrap();
    run_script_text(&conn, "1|1|Ann|555|9\n").unwrap();
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM WorkBenefits"), 0);

    set_experience(&conn, 1, 10);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM WorkBenefits"), 1);
    set_experience(&conn, 1, 11);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM WorkBenefits"), 1);
    set_experience(&conn, 1, 9);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM WorkBenefits"), 0);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM AgentBenefit"), 0);
}

#[test]
fn test_salary_shared_by_many_agents() {
    let conn = open_in_memory_migrated().unwrap();
    run_script_text(
        &conn,
        "1|1|A|1|1\n1|1|B|2|2\n1|1|C|3|3\n1|5|5000|3|1\n",
    )
    .unwrap();
    for agent in [2, 3] {
        let link = try_link_salary(&conn, EntityId::from_raw(agent), EntityId::from_raw(1)).unwrap();
        assert!(link.is_linked());
    }
    assert_eq!(count(&conn, "SELECT COUNT(DISTINCT AgentID) FROM AgentSalary WHERE SalaryID = 1"), 3);
}

#[test]
fn test_customer_snapshot_follows_every_reference_update() {
    let conn = open_in_memory_migrated().unwrap();
    run_script_text(
        &conn,
        "1|4|0|0|Cy|1\n2|4|1|AgentID|3\n2|4|1|bookid|5\n2|4|1|AgentID|0\n",
    )
    .unwrap();

    assert_eq!(count(&conn, "SELECT COUNT(*) FROM CustomerAgentBook WHERE CustomerID = 1"), 1);
    assert_eq!(
        count(
            &conn,
            "SELECT COUNT(*) FROM CustomerAgentBook c JOIN Customers u ON c.CustomerID = u.CustomerID
             WHERE c.AgentID = u.AgentID AND c.BookID = u.BookID AND u.AgentID = 0 AND u.BookID = 5"
        ),
        1
    );
}

#[test]
fn test_name_update_leaves_snapshot_alone() {
    let conn = open_in_memory_migrated().unwrap();
    run_script_text(&conn, "1|4|2|3|Cy|1\n").unwrap();
    let before = count(&conn, "SELECT Link FROM CustomerAgentBook WHERE CustomerID = 1");
    run_script_text(&conn, "2|4|1|Name|Cyrus\n").unwrap();
    assert_eq!(
        count(&conn, "SELECT Link FROM CustomerAgentBook WHERE CustomerID = 1"),
        before
    );
}

#[test]
fn test_purge_book_and_author_nullify_references() {
    let conn = open_in_memory_migrated().unwrap();
    run_script_text(
        &conn,
        "1|3|Kim|1|40\n1|2|Book|1|20\n1|4|0|1|Cy|1\n1|4|0|1|Di|2\n3|3|1\n3|2|1\n",
    )
    .unwrap();

    assert_eq!(count(&conn, "SELECT COUNT(*) FROM Books"), 0);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM Authors"), 0);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM BookAuthor"), 0);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM Customers WHERE BookID = 0"), 2);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM CustomerAgentBook"), 0);
}

#[test]
fn test_purge_author_keeps_books() {
    let conn = open_in_memory_migrated().unwrap();
    run_script_text(&conn, "1|3|Kim|1|40\n1|2|Book|1|20\n3|3|1\n").unwrap();

    assert_eq!(count(&conn, "SELECT COUNT(*) FROM Books WHERE AuthorID = 0"), 1);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM BookAuthor"), 0);
}

#[test]
fn test_purge_salary_and_customer_remove_their_links() {
    let conn = open_in_memory_migrated().unwrap();
    run_script_text(
        &conn,
        "1|1|A|1|1\n1|1|B|2|2\n1|5|5000|3|1\n1|4|1|0|Cy|1\n",
    )
    .unwrap();
    try_link_salary(&conn, EntityId::from_raw(2), EntityId::from_raw(1)).unwrap();

    let salary = cascade_delete(&conn, EntityKind::Salary, EntityId::from_raw(1));
    assert!(salary.deleted);
    assert_eq!(salary.links_removed, 2);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM AgentSalary"), 0);

    let customer = cascade_delete(&conn, EntityKind::Customer, EntityId::from_raw(1));
    assert!(customer.deleted);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM CustomerAgentBook"), 0);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM Agents"), 2);
}

#[test]
fn test_purge_of_missing_row_sweeps_stray_links() {
    let conn = open_in_memory_migrated().unwrap();
    conn.execute_batch("INSERT INTO AgentSalary (AgentID, SalaryID) VALUES (1, 99);")
        .unwrap();

    let report = cascade_delete(&conn, EntityKind::Salary, EntityId::from_raw(99));
    assert!(!report.deleted);
    assert_eq!(report.links_removed, 1);
}
