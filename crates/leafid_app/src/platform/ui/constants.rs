pub const TITLE: &str = "LeafID - medicinal plant identification";
pub const PROMPT: &str = "leafid> ";
pub const SEPARATOR: &str = "----------------------------------------";

pub const BAR_FILLED: char = '#';
pub const BAR_EMPTY: char = '-';

pub const HELP_LINES: &[&str] = &[
    "pick <path>      choose an image through the picker",
    "drop <path>      drop an image onto the upload area",
    "input <path>     set the file input to an image",
    "submit           identify the previewed image",
    "cancel           discard the previewed image",
    "reset            classify another image",
    "plant <name>     show the uses of a plant",
    "feature <key>    show a feature card",
    "close            close the open dialog",
    "outside          click outside the open dialog",
    "esc              press Escape",
    "help             show this list",
    "quit             leave",
];
