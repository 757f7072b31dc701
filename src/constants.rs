/// Primary key of the single owner account. Bootstrap commands create the
/// owner under this id and every lookup of "the" owner uses it.
pub const OWNER_ID: i32 = 1;

pub mod session {
    /// Session key holding the authenticated owner's id.
    pub const OWNER_KEY: &str = "owner_id";

    /// Session key holding the queued flash messages.
    pub const FLASH_KEY: &str = "_flashes";
}

pub mod seed {
    pub const OWNER_NAME: &str = "Jesse";

    pub const ADMIN_NAME: &str = "Admin";

    pub const MOVIES: &[(&str, &str)] = &[
        ("My Neighbor Totoro", "1988"),
        ("Dead Poets Society", "1989"),
        ("A Perfect World", "1993"),
        ("Leon", "1994"),
        ("Mahjong", "1996"),
        ("Swallowtail Butterfly", "1996"),
        ("King of Comedy", "1999"),
        ("Devils on the Doorstep", "1999"),
        ("WALL-E", "2008"),
        ("The Pork of Music", "2012"),
    ];
}
