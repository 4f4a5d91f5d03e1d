// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

crate::diesel_newtype! {
    #[derive(Copy)] GuestId(uuid::Uuid) => diesel::sql_types::Uuid
}

impl GuestId {
    /// Create a new random [`GuestId`]
    pub fn generate() -> Self {
        Self::from(uuid::Uuid::new_v4())
    }
}
