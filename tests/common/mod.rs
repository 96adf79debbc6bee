//! Shared fixture: a store seeded with sales orders, partners, users and
//! groups.
//!
//! Read access on the source models:
//!
//! ```text
//! sale.order   Sales, Shared
//! res.partner  Shared, Partners
//! ```

#![allow(dead_code)]

use bve::model::{AccessRule, FieldId, FieldType, GroupId, UserId};
use bve::platform::{AccessStore, SqlExecutor};
use bve::{Env, SchemaRegistry, SqliteStore};

const SOURCE_TABLES: &str = "
CREATE TABLE sale_order (
    id INTEGER PRIMARY KEY,
    write_uid INTEGER,
    write_date TEXT,
    create_uid INTEGER,
    create_date TEXT,
    amount_total REAL,
    region TEXT,
    state TEXT,
    partner_id INTEGER
);

CREATE TABLE res_partner (
    id INTEGER PRIMARY KEY,
    write_uid INTEGER,
    write_date TEXT,
    create_uid INTEGER,
    create_date TEXT,
    name TEXT,
    country TEXT
);

INSERT INTO res_partner VALUES
    (1, 1, '2024-01-01', 1, '2024-01-01', 'Acme', 'BE'),
    (2, 1, '2024-01-01', 1, '2024-01-01', 'Globex', 'FR');

INSERT INTO sale_order VALUES
    (1, 1, '2024-02-01', 1, '2024-02-01', 100.0, 'North', 'sale', 1),
    (2, 1, '2024-02-02', 1, '2024-02-02', 250.5, 'South', 'draft', 2),
    (3, 1, '2024-02-03', 1, '2024-02-03', 75.25, 'North', 'sale', 2);
";

pub struct Fixture {
    pub store: SqliteStore,
    pub registry: SchemaRegistry,
    pub admin: UserId,
    pub alice: UserId,
    pub bob: UserId,
    pub carol: UserId,
    pub sales: GroupId,
    pub shared: GroupId,
    pub partners: GroupId,
    pub amount: FieldId,
    pub region: FieldId,
    pub state: FieldId,
    pub partner_id: FieldId,
    pub partner_name: FieldId,
    pub country: FieldId,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_store(SqliteStore::open_in_memory().unwrap())
    }

    pub fn with_store(mut store: SqliteStore) -> Self {
        store.execute(SOURCE_TABLES).unwrap();

        let order = store.declare_model("sale.order", "sale_order", "Sales Order").unwrap();
        let amount = store
            .declare_field(order, "amount_total", "Total", FieldType::Monetary)
            .unwrap();
        let region = store
            .declare_field(order, "region", "Region", FieldType::Char)
            .unwrap();
        let state = store
            .declare_field(order, "state", "Status", FieldType::Selection)
            .unwrap();
        store.add_selection_value(state, "draft", "Quotation").unwrap();
        store.add_selection_value(state, "sale", "Sales Order").unwrap();
        let partner_id = store
            .declare_field(order, "partner_id", "Customer", FieldType::Many2one)
            .unwrap();
        store.set_field_relation(partner_id, "res.partner").unwrap();

        let partner = store.declare_model("res.partner", "res_partner", "Contact").unwrap();
        let partner_name = store
            .declare_field(partner, "name", "Name", FieldType::Char)
            .unwrap();
        let country = store
            .declare_field(partner, "country", "Country", FieldType::Char)
            .unwrap();

        let admin = store.create_user("admin", Some(1)).unwrap();
        let alice = store.create_user("alice", Some(1)).unwrap();
        let bob = store.create_user("bob", Some(2)).unwrap();
        let carol = store.create_user("carol", None).unwrap();

        let sales = store.create_group("Sales").unwrap();
        let shared = store.create_group("Shared").unwrap();
        let partners = store.create_group("Partners").unwrap();
        store.add_user_to_group(sales, alice).unwrap();
        store.add_user_to_group(partners, bob).unwrap();
        store.add_user_to_group(shared, carol).unwrap();
        store.add_user_to_group(sales, admin).unwrap();

        for (model_id, group) in [(order, sales), (order, shared), (partner, shared), (partner, partners)] {
            store
                .create_access(&AccessRule::read_only("source read", model_id, group))
                .unwrap();
        }

        let mut registry = SchemaRegistry::new();
        registry.boot(&store).unwrap();

        Self {
            store,
            registry,
            admin,
            alice,
            bob,
            carol,
            sales,
            shared,
            partners,
            amount,
            region,
            state,
            partner_id,
            partner_name,
            country,
        }
    }

    pub fn env(&mut self) -> Env<'_, SqliteStore> {
        Env::new(&mut self.store, &mut self.registry, self.admin)
    }

    /// Total amount as a measure, broken down by region, in the legacy
    /// single-quoted form the query builder used to submit.
    pub fn sales_by_region(&self) -> String {
        format!(
            "[{{'id': {}, 'name': u'amount', 'table_alias': u't0', 'row': false, \
             'column': false, 'measure': true, 'custom': false}}, \
             {{'id': {}, 'name': u'region', 'table_alias': u't0', 'row': true, \
             'column': false, 'measure': false, 'custom': false}}]",
            self.amount, self.region
        )
    }

    /// Amount by partner country and order status, joining orders to partners.
    pub fn sales_by_country(&self) -> String {
        format!(
            r#"[
                {{"id": {amount}, "name": "amount", "table_alias": "t0", "measure": true}},
                {{"id": {state}, "name": "state", "table_alias": "t0", "column": true}},
                {{"id": {partner_id}, "name": "partner_id", "table_alias": "t0", "join_node": "t1"}},
                {{"id": {country}, "name": "country", "table_alias": "t1", "row": true,
                  "description": "Customer Country"}}
            ]"#,
            amount = self.amount,
            state = self.state,
            partner_id = self.partner_id,
            country = self.country,
        )
    }

    /// Whether a relational view named `name` exists.
    pub fn view_exists(&self, name: &str) -> bool {
        self.store
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'view' AND name = ?1",
                [name],
                |row| row.get::<_, i64>(0),
            )
            .unwrap()
            > 0
    }

    /// Columns of a relational view, in order.
    pub fn view_columns(&self, name: &str) -> Vec<String> {
        let mut stmt = self
            .store
            .connection()
            .prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid")
            .unwrap();
        stmt.query_map([name], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap()
    }
}
