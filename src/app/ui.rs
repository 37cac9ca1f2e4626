mod center;
mod controls;
mod dialogs;
mod icons;
mod info;
mod top;
