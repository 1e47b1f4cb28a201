//! SQL schema for the Greens SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Person accounts. Admins are people with is_admin = 1.
CREATE TABLE IF NOT EXISTS users (
    id              INTEGER PRIMARY KEY,
    name            TEXT NOT NULL,
    email           TEXT NOT NULL UNIQUE,
    password_hash   TEXT NOT NULL,   -- argon2 PHC string
    remember_token  TEXT,
    is_admin        INTEGER NOT NULL DEFAULT 0,
    created_at      TEXT NOT NULL,   -- RFC 3339 UTC
    updated_at      TEXT NOT NULL
);

-- Organization (contractor) accounts. The role is implied by the table.
CREATE TABLE IF NOT EXISTS companies (
    id              INTEGER PRIMARY KEY,
    name            TEXT NOT NULL,
    email           TEXT NOT NULL UNIQUE,
    password_hash   TEXT NOT NULL,
    remember_token  TEXT,
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL
);

PRAGMA user_version = 1;
";
