/// A flat CSV table: file name (relative to the data root) and header row
#[derive(Debug, Clone, Copy)]
pub struct TableFile {
    pub name: &'static str,
    pub headers: &'static [&'static str],
}

/// Credentials table: usuario, contraseña
pub const USERS: TableFile = TableFile {
    name: "usuarios.csv",
    headers: &["usuario", "contraseña"],
};

/// Remembered login: same columns as USERS, at most one row
pub const REMEMBERED: TableFile = TableFile {
    name: "credenciales_guardadas.csv",
    headers: &["usuario", "contraseña"],
};

/// Directory holding one ledger table per user (`data/<username>.csv`)
pub const LEDGER_DIR: &str = "data";

/// Header row of every ledger table
pub const LEDGER_HEADERS: &[&str] = &[
    "tipo",
    "subtipo",
    "fecha",
    "monto",
    "referencia",
    "cuotas",
    "dolares",
];
