pub(crate) mod shell;
pub(crate) mod toast;
