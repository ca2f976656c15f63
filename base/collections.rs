// This file is part of the Stream Control Manager.
// Copyright (C) 2026 The Stream Control Manager Authors; see AUTHORS and LICENSE.txt.
// SPDX-License-Identifier: GPL-3.0-or-later WITH GPL-3.0-linking-exception.

//! Hasher-swapped collection aliases, used everywhere an insertion-order-
//! independent map/set is keyed by an id we already trust (stream ids,
//! broker ids, object ids) and the DoS-resistance of the default
//! `SipHash`-based `HashMap` buys us nothing.

pub type FastHashMap<K, V> = std::collections::HashMap<K, V, ahash::RandomState>;
pub type FastHashSet<T> = std::collections::HashSet<T, ahash::RandomState>;
