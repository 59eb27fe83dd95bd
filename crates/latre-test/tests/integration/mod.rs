mod helpers;
mod import_export;
mod properties;
mod shell;
