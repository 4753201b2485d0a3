diesel::table! {
    clients (id) {
        id -> BigInt,
        company_id -> BigInt,
        client_name -> Text,
        client_email -> Text,
        metadata -> Text,
    }
}
