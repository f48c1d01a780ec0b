// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "https://www.loterias.com/loto-3/resultados";
pub const FETCH_TIMEOUT_SECS: u64 = 10;
pub const USER_AGENT: &str = concat!("loto_scrape/", env!("CARGO_PKG_VERSION"));

// Local store
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "loto_scrape.log";
pub const DEFAULT_LEDGER: &str = "out/loto3.csv";
pub const DEFAULT_HISTORY: &str = "out/history.csv";
pub const DEFAULT_WINDOWS: &str = "out/windows.csv";
pub const LEDGER_SEP: char = ',';

// Month abbreviations as printed on the results page. Order matters: first match wins.
pub const MESES: &[(&str, &str)] = &[
    ("ene.", "01"), ("feb.", "02"), ("mar.", "03"), ("abr.", "04"),
    ("may.", "05"), ("jun.", "06"), ("jul.", "07"), ("ago.", "08"),
    ("sep.", "09"), ("oct.", "10"), ("nov.", "11"), ("dic.", "12"),
];

// Ledger columns
pub const TIMESTAMP_HEADER: &str = "FechaHora";
pub const DATE_HEADER: &str = "Fecha";
pub const SESSION_HEADER: &str = "Turno";
pub const DIGIT_HEADERS: [&str; 3] = ["Num1", "Num2", "Num3"];
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// History / training windows
pub const FIRST_YEAR: i32 = 2009;
pub const DEFAULT_SEQ_LEN: usize = 10;
