// Main menu: buttons and the screen that lays them out

pub mod button;
pub mod main_menu;

pub use button::MenuAction;
pub use main_menu::Menu;
