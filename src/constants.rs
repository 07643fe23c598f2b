use rust_decimal::Decimal;

/// Income subtypes offered by the income form
pub const INCOME_SUBTYPES: [&str; 2] = ["Fijo", "Variable"];

/// Expense subtypes offered by the expense form
pub const EXPENSE_SUBTYPES: [&str; 3] = ["Tarjeta", "Débito Automático", "Gasto Vario"];

/// Markup applied to the published blue sell rate (simulated card dollar)
pub const CARD_RATE_MARKUP: Decimal = Decimal::from_parts(13, 0, 0, false, 1);

/// Largest amount accepted from a form or produced by conversion (10^15)
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Name of the signed session cookie
pub const SESSION_COOKIE: &str = "bolso_session";

// =============================================================================
// Error Messages
// =============================================================================

pub const ERR_MISSING_FIELDS: &str = "Debes completar todos los campos.";

pub const ERR_USER_EXISTS: &str = "El usuario ya existe.";

pub const ERR_INVALID_CREDENTIALS: &str = "Usuario o contraseña incorrectos.";

pub const ERR_INVALID_USERNAME: &str =
    "El nombre de usuario no puede contener '/' ni '\\' ni empezar con '.'";

pub const ERR_RATE_UNAVAILABLE: &str =
    "No se pudo obtener la cotización del dólar. Intentá más tarde.";

pub const ERR_INVALID_AMOUNT: &str = "El monto debe ser un número mayor o igual a cero.";

pub const ERR_AMOUNT_TOO_LARGE: &str = "El monto es demasiado grande.";

pub const ERR_TOTALS_OVERFLOW: &str =
    "Los montos del período son demasiado grandes para calcular el total.";

pub const ERR_INVALID_INSTALLMENTS: &str = "Las cuotas deben ser al menos 1.";

pub const ERR_INVALID_DATE: &str = "La fecha debe tener el formato AAAA-MM-DD.";

pub const ERR_INVALID_SUBTYPE: &str = "Subtipo desconocido.";

pub const ERR_ENTRY_NOT_FOUND: &str = "No existe un registro con ese índice.";

pub const ERR_INVALID_KIND: &str = "El tipo debe ser Ingreso o Gasto.";

pub const ERR_INVALID_MONTH: &str = "El mes debe estar entre 1 y 12.";

pub const ERR_INVALID_YEAR: &str = "El año debe ser un número entero.";

// =============================================================================
// Success Messages
// =============================================================================

pub const MSG_REGISTERED: &str = "Usuario creado exitosamente. Ahora podés iniciar sesión.";

pub const MSG_INCOME_SAVED: &str = "Ingreso registrado exitosamente.";

pub const MSG_EXPENSE_SAVED: &str = "Gasto registrado exitosamente.";

pub const MSG_ENTRY_UPDATED: &str = "Registro modificado exitosamente.";

pub const MSG_ENTRY_DELETED: &str = "Registro eliminado exitosamente.";
