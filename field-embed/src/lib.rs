// © 2020, ETH Zurich
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The core field-embedding library and API
//!
//! Models records that embed another record and resolves field accesses
//! against them: a field declared on the outer record shadows a same-named
//! field of the embedded record for unqualified access, while qualified
//! access through the embedded sub-value always reaches the inner field.

pub mod resolve;
