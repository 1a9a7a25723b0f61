/// Schema for the PostgreSQL backend. Every statement is safe to re-run.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id            UUID PRIMARY KEY,
        first_name    VARCHAR(50)  NOT NULL,
        last_name     VARCHAR(50)  NOT NULL,
        email         VARCHAR(255) NOT NULL,
        password_hash TEXT         NOT NULL,
        roles         TEXT[]       NOT NULL DEFAULT '{ROLE_USER}',
        created_at    TIMESTAMPTZ  NOT NULL DEFAULT now(),
        updated_at    TIMESTAMPTZ  NOT NULL DEFAULT now(),
        CONSTRAINT users_email_key UNIQUE (email)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS schedule_items (
        id          UUID PRIMARY KEY,
        user_id     UUID         NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        title       VARCHAR(100) NOT NULL,
        item_type   VARCHAR(50)  NOT NULL,
        location    VARCHAR(100) NOT NULL,
        description TEXT         NOT NULL,
        start_time  TIMESTAMP    NOT NULL,
        end_time    TIMESTAMP    NOT NULL,
        priority    VARCHAR(20)  NOT NULL,
        created_at  TIMESTAMPTZ  NOT NULL DEFAULT now(),
        updated_at  TIMESTAMPTZ  NOT NULL DEFAULT now()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS schedule_items_user_id_idx ON schedule_items (user_id)",
];
