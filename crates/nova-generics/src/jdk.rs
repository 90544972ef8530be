//! Built-in declarations for the parts of the JDK the relations depend on.

use crate::{ClassDef, MethodDef, PrimitiveType, Type, TypeParamDef, TypeStore, TypeVarId};

pub(crate) fn core_store() -> TypeStore {
    let mut store = TypeStore::with_interned_well_known();
    let wk = crate::TypeEnv::well_known(&store).clone();

    let object = Type::class(wk.object, vec![]);
    let serializable = Type::class(wk.serializable, vec![]);

    store.define_class(wk.object, ClassDef::class("java.lang.Object"));
    store.define_class(wk.serializable, ClassDef::interface("java.io.Serializable"));
    store.define_class(wk.cloneable, ClassDef::interface("java.lang.Cloneable"));

    let comparable_t = store.add_type_param("T", vec![object.clone()]);
    let mut comparable =
        ClassDef::interface("java.lang.Comparable").with_type_params(vec![comparable_t]);
    comparable.methods.push(instance_method(
        "compareTo",
        vec![Type::TypeVar(comparable_t)],
        Type::int(),
    ));
    store.define_class(wk.comparable, comparable);

    let char_sequence = store.add_class(ClassDef::interface("java.lang.CharSequence"));
    let comparable_of = |id| Type::class(wk.comparable, vec![Type::class(id, vec![])]);

    store.define_class(
        wk.string,
        ClassDef::class("java.lang.String").final_().implements(vec![
            serializable.clone(),
            comparable_of(wk.string),
            Type::class(char_sequence, vec![]),
        ]),
    );

    let mut number = ClassDef::class("java.lang.Number").implements(vec![serializable.clone()]);
    number.modifiers.is_abstract = true;
    store.define_class(wk.number, number);

    store.define_class(wk.void, ClassDef::class("java.lang.Void").final_());

    for (id, name) in [
        (wk.boolean, "java.lang.Boolean"),
        (wk.character, "java.lang.Character"),
    ] {
        store.define_class(
            id,
            ClassDef::class(name)
                .final_()
                .implements(vec![serializable.clone(), comparable_of(id)]),
        );
    }

    for (id, name) in [
        (wk.byte, "java.lang.Byte"),
        (wk.short, "java.lang.Short"),
        (wk.integer, "java.lang.Integer"),
        (wk.long, "java.lang.Long"),
        (wk.float, "java.lang.Float"),
        (wk.double, "java.lang.Double"),
    ] {
        store.define_class(
            id,
            ClassDef::class(name)
                .final_()
                .extends(Type::class(wk.number, vec![]))
                .implements(vec![comparable_of(id)]),
        );
    }

    // Enum<E extends Enum<E>>
    let enum_id = store.intern_class_id("java.lang.Enum");
    let enum_e = store.add_type_param("E", vec![]);
    store.define_type_param(
        enum_e,
        TypeParamDef::new("E", vec![Type::class(enum_id, vec![Type::TypeVar(enum_e)])]),
    );
    let mut enum_def = ClassDef::class("java.lang.Enum")
        .with_type_params(vec![enum_e])
        .implements(vec![
            Type::class(wk.comparable, vec![Type::TypeVar(enum_e)]),
            serializable.clone(),
        ]);
    enum_def.modifiers.is_abstract = true;
    store.define_class(enum_id, enum_def);

    let throwable = store.add_class(
        ClassDef::class("java.lang.Throwable").implements(vec![serializable.clone()]),
    );
    let exception = store.add_class(
        ClassDef::class("java.lang.Exception").extends(Type::class(throwable, vec![])),
    );
    store.add_class(
        ClassDef::class("java.lang.RuntimeException").extends(Type::class(exception, vec![])),
    );

    let iterable_t = store.add_type_param("T", vec![object.clone()]);
    store.add_class(ClassDef::interface("java.lang.Iterable").with_type_params(vec![iterable_t]));

    store
}

/// `java.util` collections plus `Runnable` and `java.util.function.Function`.
pub(crate) fn define_minimal_util(store: &mut TypeStore) {
    let wk = crate::TypeEnv::well_known(&*store).clone();
    let object = Type::class(wk.object, vec![]);
    let Some(iterable) = store.class_id("java.lang.Iterable") else {
        return;
    };

    let collection_e = store.add_type_param("E", vec![object.clone()]);
    let mut collection = ClassDef::interface("java.util.Collection")
        .with_type_params(vec![collection_e])
        .implements(vec![Type::class(iterable, vec![Type::TypeVar(collection_e)])]);
    collection.methods.push(instance_method(
        "add",
        vec![Type::TypeVar(collection_e)],
        Type::boolean(),
    ));
    collection.methods.push(instance_method("size", vec![], Type::int()));
    let collection = store.add_class(collection);

    let list_e = store.add_type_param("E", vec![object.clone()]);
    let mut list = ClassDef::interface("java.util.List")
        .with_type_params(vec![list_e])
        .implements(vec![Type::class(collection, vec![Type::TypeVar(list_e)])]);
    list.methods.push(instance_method("get", vec![Type::int()], Type::TypeVar(list_e)));
    list.methods.push(instance_method("add", vec![Type::TypeVar(list_e)], Type::boolean()));
    let list = store.add_class(list);

    let random_access = store.add_class(ClassDef::interface("java.util.RandomAccess"));

    let abstract_list_e = store.add_type_param("E", vec![object.clone()]);
    let mut abstract_list = ClassDef::class("java.util.AbstractList")
        .with_type_params(vec![abstract_list_e])
        .implements(vec![Type::class(list, vec![Type::TypeVar(abstract_list_e)])]);
    abstract_list.modifiers.is_abstract = true;
    let abstract_list = store.add_class(abstract_list);

    let array_list_e = store.add_type_param("E", vec![object.clone()]);
    store.add_class(
        ClassDef::class("java.util.ArrayList")
            .with_type_params(vec![array_list_e])
            .extends(Type::class(abstract_list, vec![Type::TypeVar(array_list_e)]))
            .implements(vec![
                Type::class(list, vec![Type::TypeVar(array_list_e)]),
                Type::class(random_access, vec![]),
                Type::class(wk.cloneable, vec![]),
                Type::class(wk.serializable, vec![]),
            ]),
    );

    let map_k = store.add_type_param("K", vec![object.clone()]);
    let map_v = store.add_type_param("V", vec![object.clone()]);
    let mut map = ClassDef::interface("java.util.Map").with_type_params(vec![map_k, map_v]);
    map.methods.push(instance_method(
        "get",
        vec![object.clone()],
        Type::TypeVar(map_v),
    ));
    map.methods.push(instance_method(
        "put",
        vec![Type::TypeVar(map_k), Type::TypeVar(map_v)],
        Type::TypeVar(map_v),
    ));
    let map = store.add_class(map);

    let entry_k = store.add_type_param("K", vec![object.clone()]);
    let entry_v = store.add_type_param("V", vec![object.clone()]);
    let mut entry =
        ClassDef::interface("java.util.Map.Entry").with_type_params(vec![entry_k, entry_v]);
    entry.outer = Some(map);
    entry.modifiers.is_static = true;
    store.add_class(entry);

    let hash_map_k = store.add_type_param("K", vec![object.clone()]);
    let hash_map_v = store.add_type_param("V", vec![object.clone()]);
    store.add_class(
        ClassDef::class("java.util.HashMap")
            .with_type_params(vec![hash_map_k, hash_map_v])
            .implements(vec![
                Type::class(map, vec![Type::TypeVar(hash_map_k), Type::TypeVar(hash_map_v)]),
                Type::class(wk.cloneable, vec![]),
                Type::class(wk.serializable, vec![]),
            ]),
    );

    let mut runnable = ClassDef::interface("java.lang.Runnable");
    runnable
        .methods
        .push(abstract_method("run", vec![], Type::Void, vec![]));
    store.add_class(runnable);

    let function_t = store.add_type_param("T", vec![object.clone()]);
    let function_r = store.add_type_param("R", vec![object]);
    let mut function = ClassDef::interface("java.util.function.Function")
        .with_type_params(vec![function_t, function_r]);
    function.methods.push(abstract_method(
        "apply",
        vec![Type::TypeVar(function_t)],
        Type::TypeVar(function_r),
        vec![],
    ));
    store.add_class(function);
}

fn instance_method(name: &str, params: Vec<Type>, return_type: Type) -> MethodDef {
    MethodDef {
        name: name.to_string(),
        type_params: Vec::<TypeVarId>::new(),
        params,
        return_type,
        thrown: Vec::new(),
        is_static: false,
        is_varargs: false,
        is_abstract: false,
    }
}

fn abstract_method(
    name: &str,
    params: Vec<Type>,
    return_type: Type,
    thrown: Vec<Type>,
) -> MethodDef {
    MethodDef {
        thrown,
        is_abstract: true,
        ..instance_method(name, params, return_type)
    }
}

/// The box class of `prim`.
pub(crate) fn box_class(wk: &crate::WellKnownTypes, prim: PrimitiveType) -> crate::ClassId {
    match prim {
        PrimitiveType::Boolean => wk.boolean,
        PrimitiveType::Byte => wk.byte,
        PrimitiveType::Short => wk.short,
        PrimitiveType::Char => wk.character,
        PrimitiveType::Int => wk.integer,
        PrimitiveType::Long => wk.long,
        PrimitiveType::Float => wk.float,
        PrimitiveType::Double => wk.double,
    }
}
