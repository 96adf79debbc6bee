//! Table layout of the SQLite host store.

/// Schema version stored in `meta`. Bump when the layout changes.
pub const SCHEMA_VERSION: i32 = 1;

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS ir_model (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    model TEXT NOT NULL UNIQUE,
    table_name TEXT NOT NULL,
    state TEXT NOT NULL DEFAULT 'base'
);

CREATE TABLE IF NOT EXISTS ir_model_fields (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    model_id INTEGER NOT NULL REFERENCES ir_model(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    complete_name TEXT,
    relation TEXT,
    field_description TEXT NOT NULL,
    ttype TEXT NOT NULL,
    selection TEXT,
    size INTEGER,
    state TEXT NOT NULL DEFAULT 'base',
    UNIQUE (model_id, name)
);

CREATE TABLE IF NOT EXISTS ir_model_fields_selection (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    field_id INTEGER NOT NULL REFERENCES ir_model_fields(id) ON DELETE CASCADE,
    sequence INTEGER NOT NULL DEFAULT 0,
    value TEXT NOT NULL,
    label TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS res_groups (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS res_users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    login TEXT NOT NULL UNIQUE,
    company_id INTEGER
);

CREATE TABLE IF NOT EXISTS res_groups_users_rel (
    gid INTEGER NOT NULL REFERENCES res_groups(id) ON DELETE CASCADE,
    uid INTEGER NOT NULL REFERENCES res_users(id) ON DELETE CASCADE,
    PRIMARY KEY (gid, uid)
);

CREATE TABLE IF NOT EXISTS ir_model_access (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    model_id INTEGER NOT NULL REFERENCES ir_model(id) ON DELETE CASCADE,
    group_id INTEGER REFERENCES res_groups(id) ON DELETE CASCADE,
    active INTEGER NOT NULL DEFAULT 1,
    perm_read INTEGER NOT NULL DEFAULT 0,
    perm_write INTEGER NOT NULL DEFAULT 0,
    perm_create INTEGER NOT NULL DEFAULT 0,
    perm_unlink INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS ir_ui_view (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    type TEXT NOT NULL,
    model TEXT NOT NULL,
    priority INTEGER NOT NULL DEFAULT 16,
    arch TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS ir_act_window (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    res_model TEXT NOT NULL,
    view_mode TEXT NOT NULL,
    view_id INTEGER REFERENCES ir_ui_view(id) ON DELETE SET NULL,
    context TEXT
);

CREATE TABLE IF NOT EXISTS bve_view (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    model_name TEXT NOT NULL,
    note TEXT,
    state TEXT NOT NULL DEFAULT 'draft',
    data TEXT,
    action_id INTEGER REFERENCES ir_act_window(id) ON DELETE SET NULL,
    view_id INTEGER REFERENCES ir_ui_view(id) ON DELETE SET NULL
);

CREATE TABLE IF NOT EXISTS bve_view_group_rel (
    view_id INTEGER NOT NULL REFERENCES bve_view(id) ON DELETE CASCADE,
    group_id INTEGER NOT NULL REFERENCES res_groups(id) ON DELETE CASCADE,
    PRIMARY KEY (view_id, group_id)
);

CREATE TABLE IF NOT EXISTS bve_view_user_rel (
    view_id INTEGER NOT NULL REFERENCES bve_view(id) ON DELETE CASCADE,
    user_id INTEGER NOT NULL REFERENCES res_users(id) ON DELETE CASCADE,
    PRIMARY KEY (view_id, user_id)
);

CREATE TABLE IF NOT EXISTS registry_signal (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    sequence INTEGER NOT NULL,
    store_id TEXT
);

INSERT OR IGNORE INTO registry_signal (id, sequence) VALUES (1, 0);

CREATE TABLE IF NOT EXISTS hr_holidays_public (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    year INTEGER NOT NULL,
    company_id INTEGER,
    state TEXT NOT NULL DEFAULT 'draft'
);

CREATE TABLE IF NOT EXISTS hr_holidays_public_line (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    holiday_id INTEGER NOT NULL REFERENCES hr_holidays_public(id) ON DELETE CASCADE,
    date TEXT NOT NULL,
    name TEXT NOT NULL,
    scheduled INTEGER NOT NULL DEFAULT 0
);
";
