mod trades;

pub use trades::{
    add_follow_up, create_trade, delete_trade, edit_trade, index, new_trade, show_trade,
    update_trade,
};
