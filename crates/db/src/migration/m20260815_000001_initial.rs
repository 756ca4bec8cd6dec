//! Initial database migration.
//!
//! Creates the chart of accounts, journal, sequence and template tables,
//! the enums they use, and the lock-enforcement trigger.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: CHART OF ACCOUNTS
        // ============================================================
        db.execute_unprepared(CHART_OF_ACCOUNTS_SQL).await?;

        // ============================================================
        // PART 3: JOURNAL & NUMBERING
        // ============================================================
        db.execute_unprepared(ENTRY_SEQUENCES_SQL).await?;
        db.execute_unprepared(JOURNAL_ENTRIES_SQL).await?;

        // ============================================================
        // PART 4: BOOKING TEMPLATES
        // ============================================================
        db.execute_unprepared(BOOKING_TEMPLATES_SQL).await?;

        // ============================================================
        // PART 5: TRIGGERS & FUNCTIONS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Account categories (SKR04)
CREATE TYPE account_type AS ENUM (
    'ASSET',
    'LIABILITY',
    'REVENUE',
    'EXPENSE'
);

-- Entry origin
CREATE TYPE source_type AS ENUM (
    'MANUAL',
    'SYSTEM',
    'REVERSAL'
);
";

const CHART_OF_ACCOUNTS_SQL: &str = r"
CREATE TABLE chart_of_accounts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    account_number INTEGER NOT NULL UNIQUE
        CHECK (account_number BETWEEN 0 AND 9999),
    name VARCHAR(255) NOT NULL,
    account_type account_type NOT NULL,
    vat_key VARCHAR(8),
    active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_accounts_number ON chart_of_accounts(account_number) WHERE active = true;
";

const ENTRY_SEQUENCES_SQL: &str = r"
CREATE TABLE entry_sequences (
    year INTEGER PRIMARY KEY,
    counter BIGINT NOT NULL DEFAULT 0
);
";

const JOURNAL_ENTRIES_SQL: &str = r"
CREATE TABLE journal_entries (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    entry_number VARCHAR(32) NOT NULL UNIQUE,
    booking_date DATE NOT NULL,
    debit_account_id UUID NOT NULL REFERENCES chart_of_accounts(id),
    credit_account_id UUID NOT NULL REFERENCES chart_of_accounts(id),
    amount NUMERIC(19, 4) NOT NULL CHECK (amount > 0),
    description TEXT NOT NULL,
    source_type source_type NOT NULL DEFAULT 'MANUAL',
    reversal_of_entry_id UUID REFERENCES journal_entries(id),
    locked BOOLEAN NOT NULL DEFAULT false,
    locked_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CHECK (debit_account_id <> credit_account_id)
);

CREATE INDEX idx_journal_booking_date ON journal_entries(booking_date);
CREATE INDEX idx_journal_debit_account ON journal_entries(debit_account_id);
CREATE INDEX idx_journal_credit_account ON journal_entries(credit_account_id);
CREATE INDEX idx_journal_locked ON journal_entries(locked) WHERE locked = false;
";

const BOOKING_TEMPLATES_SQL: &str = r"
-- Templates carry account numbers, not ids: they stay usable when an
-- account is replaced under the same number.
CREATE TABLE booking_templates (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL UNIQUE,
    debit_account_number INTEGER NOT NULL
        CHECK (debit_account_number BETWEEN 0 AND 9999),
    credit_account_number INTEGER NOT NULL
        CHECK (credit_account_number BETWEEN 0 AND 9999),
    default_amount NUMERIC(19, 4) CHECK (default_amount IS NULL OR default_amount > 0),
    default_description TEXT,
    use_count BIGINT NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CHECK (debit_account_number <> credit_account_number)
);
";

const TRIGGERS_SQL: &str = r"
-- ============================================================
-- FUNCTION: enforce_entry_lock
-- Locked journal entries are immutable (GoBD). Corrections go
-- through reversal entries only.
-- ============================================================
CREATE OR REPLACE FUNCTION enforce_entry_lock()
RETURNS TRIGGER AS $$
BEGIN
    IF TG_OP = 'DELETE' THEN
        IF OLD.locked THEN
            RAISE EXCEPTION 'Cannot delete locked entry %. Create a reversal entry instead.',
                OLD.entry_number;
        END IF;
        RETURN OLD;
    END IF;

    IF OLD.locked THEN
        RAISE EXCEPTION 'Cannot modify locked entry %. Create a reversal entry instead.',
            OLD.entry_number;
    END IF;

    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_enforce_entry_lock
BEFORE UPDATE OR DELETE ON journal_entries
FOR EACH ROW
EXECUTE FUNCTION enforce_entry_lock();
";

const DROP_ALL_SQL: &str = r"
DROP TRIGGER IF EXISTS trg_enforce_entry_lock ON journal_entries;
DROP FUNCTION IF EXISTS enforce_entry_lock();
DROP TABLE IF EXISTS booking_templates;
DROP TABLE IF EXISTS journal_entries;
DROP TABLE IF EXISTS entry_sequences;
DROP TABLE IF EXISTS chart_of_accounts;
DROP TYPE IF EXISTS source_type;
DROP TYPE IF EXISTS account_type;
";
