// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

crate::diesel_newtype! {
    #[derive(Copy)] SeatingId(uuid::Uuid) => diesel::sql_types::Uuid
}

impl SeatingId {
    /// Create a new random [`SeatingId`]
    pub fn generate() -> Self {
        Self::from(uuid::Uuid::new_v4())
    }
}
