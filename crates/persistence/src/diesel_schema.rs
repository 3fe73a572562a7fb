// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    establecimientos (id) {
        id -> BigInt,
        nombre -> Nullable<Text>,
        microred_id -> Nullable<BigInt>,
    }
}

diesel::table! {
    microredes (id) {
        id -> BigInt,
        nombre -> Nullable<Text>,
    }
}

diesel::table! {
    pruebas_pap (id) {
        id -> BigInt,
        nombre -> Nullable<Text>,
        edad -> Nullable<Integer>,
        fecha_toma -> Nullable<Text>,
        fecha_entrega -> Nullable<Text>,
        establecimiento_id -> Nullable<BigInt>,
        estado -> Nullable<Text>,
        resultado -> Nullable<Text>,
    }
}

diesel::table! {
    usuarios (id) {
        id -> BigInt,
        username -> Nullable<Text>,
        password -> Nullable<Text>,
        rol -> Nullable<Text>,
        establecimiento_id -> Nullable<BigInt>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(establecimientos, microredes, pruebas_pap, usuarios,);
