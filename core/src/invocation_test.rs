#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::catalog::{PersistenceVariant, Structure};
    use crate::invocation::{Invocation, Phase, SweepOptions};

    #[test]
    fn test_read_only_init_command() {
        let btree = Structure::new("btree").with_read_only(true);
        let inv = Invocation::read_only(&btree, Phase::ReadOnlyInit, &SweepOptions::default());
        assert_eq!(inv.command_line(), "./btree_ro -i");
        assert_eq!(inv.variant(), None);
        assert_eq!(inv.program(), PathBuf::from("./btree_ro").as_path());
    }

    #[test]
    fn test_list_main_carries_iterations() {
        let list = Structure::new("list_ro").with_read_only(true);
        let opts = SweepOptions::default();
        let main = Invocation::read_only(&list, Phase::ReadOnlyMain, &opts);
        assert_eq!(main.command_line(), "./list_ro_ro -n 100");
        assert_eq!(main.args(), &["-n".to_string(), "100".to_string()]);

        let init = Invocation::read_only(&list, Phase::ReadOnlyInit, &opts);
        assert_eq!(init.command_line(), "./list_ro_ro -i");
    }

    #[test]
    fn test_persistent_commands() {
        let opts = SweepOptions::default();
        let dlist = Structure::new("dlist");
        let inv = Invocation::persistent(&dlist, PersistenceVariant::PersistentWriteShortcut, Phase::FullMain, &opts);
        assert_eq!(inv.command_line(), "./dlist_per_ws -n 100");
        assert_eq!(inv.variant(), Some(PersistenceVariant::PersistentWriteShortcut));

        let tree = Structure::new("arttree");
        let inv = Invocation::persistent(&tree, PersistenceVariant::NoShortcut, Phase::FullMain, &opts);
        assert_eq!(inv.command_line(), "./arttree_noshortcut");
        assert!(inv.args().is_empty());

        let inv = Invocation::persistent(&tree, PersistenceVariant::Indirect, Phase::FullInit, &opts);
        assert_eq!(inv.command_line(), "./arttree_indirect -i");
    }

    #[test]
    fn test_options_shape_program_and_flags() {
        let opts = SweepOptions {
            bin_dir: PathBuf::from("build/bench"),
            list_iterations: 7,
        };
        let list = Structure::new("list");
        let inv = Invocation::persistent(&list, PersistenceVariant::Persistent, Phase::FullMain, &opts);
        assert_eq!(inv.program(), PathBuf::from("build/bench/list_per").as_path());
        assert_eq!(inv.args(), &["-n".to_string(), "7".to_string()]);
    }

    #[test]
    fn test_phase_order_and_kinds() {
        assert_eq!(
            Phase::ALL,
            [Phase::ReadOnlyInit, Phase::FullInit, Phase::ReadOnlyMain, Phase::FullMain]
        );
        assert!(Phase::ALL.windows(2).all(|w| w[0] < w[1]));
        assert!(Phase::ReadOnlyInit.is_init() && Phase::FullInit.is_init());
        assert!(!Phase::ReadOnlyMain.is_init() && !Phase::FullMain.is_init());
        assert_eq!(Phase::FullMain.key(), "full_main");
    }
}
