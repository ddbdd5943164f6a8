//! Compatibility rule tests
//!
//! Covers the per-candidate checks and the whole-build evaluation:
//! - Duplicate detection and the RAM exemption
//! - Socket, memory and form-factor matching
//! - Cooler adequacy warnings
//! - Storage slot interfaces
//! - Display output and PSU headroom

use buildguard::analyzer::attributes::{has_integrated_graphics, PartAttributes, PartsTableExtractor};
use buildguard::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

// =============================================================================
// Test Helpers
// =============================================================================

fn part(id: &str, component_type: ComponentType, name: &str, description: &str) -> Component {
    Component::new(id, name, component_type)
        .with_description(description)
        .with_stock(5)
}

fn am5_cpu() -> Component {
    part("cpu-am5", ComponentType::Processor, "AMD Ryzen 5 7600", "Socket AM5")
}

fn am4_cpu() -> Component {
    part("cpu-am4", ComponentType::Processor, "AMD Ryzen 7 5800X", "Socket AM4")
}

fn am5_board() -> Component {
    part("mb-am5", ComponentType::Motherboard, "ASUS B650", "AM5, DDR5, ATX")
}

fn psu(name: &str) -> Component {
    part("psu", ComponentType::PowerSupply, name, "")
}

fn gpu() -> Component {
    part("gpu", ComponentType::GraphicsCard, "RTX 4060", "")
}

fn engine() -> CompatibilityEngine {
    CompatibilityEngine::new()
}

// =============================================================================
// Per-candidate checks
// =============================================================================

mod candidate_tests {
    use super::*;

    #[test]
    fn test_motherboard_socket_mismatch_cites_cpu_socket() {
        let cpu = part("cpu", ComponentType::Processor, "AMD Ryzen 5 5600", "AM4 processor");
        let board = part("mb", ComponentType::Motherboard, "B650 board", "AM5 platform");
        let build = Build::new().with(SlotId::Cpu, cpu);

        let verdict = engine().evaluate_candidate(&board, SlotId::Motherboard, &build);
        assert!(!verdict.compatible);
        assert_eq!(verdict.reasons.len(), 1);
        assert!(verdict.reasons[0].contains("AM4"));
    }

    #[test]
    fn test_processor_socket_mismatch_cites_board_socket() {
        let build = Build::new().with(SlotId::Motherboard, am5_board());
        let verdict = engine().evaluate_candidate(&am4_cpu(), SlotId::Cpu, &build);
        assert_eq!(verdict.reasons, vec!["Socket Mismatch: Requires AM5"]);
    }

    #[test]
    fn test_unknown_sockets_never_conflict() {
        let cpu = part("cpu", ComponentType::Processor, "Mystery CPU", "");
        let board = part("mb", ComponentType::Motherboard, "Mystery board", "");
        let build = Build::new().with(SlotId::Cpu, cpu.clone());
        assert!(engine().evaluate_candidate(&board, SlotId::Motherboard, &build).compatible);

        let build = Build::new().with(SlotId::Cpu, cpu).with(SlotId::Motherboard, board);
        let status = engine().evaluate_build(&build);
        assert!(status.issues.iter().all(|i| !i.contains("Socket")));
    }

    #[test]
    fn test_duplicate_item_detected() {
        let drive = part("ssd", ComponentType::Ssd, "Samsung 870 EVO", "SATA");
        let build = Build::new().with(SlotId::SsdSata, drive.clone());

        let verdict = engine().evaluate_candidate(&drive, SlotId::SsdM2, &build);
        assert_eq!(verdict.reasons[0], "This item is already in your build.");
    }

    #[test]
    fn test_ram_slot_is_exempt_from_duplicate_check() {
        let kit = part("ram", ComponentType::Memory, "Corsair 16GB DDR5", "");
        let mut build = Build::new().with(SlotId::Ram, kit.clone());
        // Same id parked in another slot still does not block the RAM slot.
        build.set(SlotId::Gpu, kit.clone());

        assert!(engine().evaluate_candidate(&kit, SlotId::Ram, &build).compatible);
    }

    #[test]
    fn test_ram_type_mismatch_and_sodimm() {
        let build = Build::new().with(SlotId::Motherboard, am5_board());
        let laptop_kit = part("ram", ComponentType::Memory, "Crucial 16GB DDR4 SODIMM", "");

        let verdict = engine().evaluate_candidate(&laptop_kit, SlotId::Ram, &build);
        assert_eq!(
            verdict.reasons,
            vec![
                "RAM Type Mismatch: Motherboard requires DDR5",
                "SODIMM RAM is for laptops, not desktops",
            ]
        );
    }

    #[test]
    fn test_sodimm_flagged_without_motherboard() {
        let laptop_kit = part("ram", ComponentType::Memory, "Crucial 16GB DDR5 SODIMM", "");
        let verdict = engine().evaluate_candidate(&laptop_kit, SlotId::Ram, &Build::new());
        assert_eq!(verdict.reasons, vec!["SODIMM RAM is for laptops, not desktops"]);
    }

    #[test]
    fn test_case_form_factor_checks() {
        let atx_build = Build::new().with(SlotId::Motherboard, am5_board());
        let itx_case = part("case", ComponentType::PcCase, "NR200", "Mini-ITX tower");
        let atx_case = part("case2", ComponentType::PcCase, "H5 Flow", "ATX mid tower");

        assert!(!engine().evaluate_candidate(&itx_case, SlotId::PcCase, &atx_build).compatible);
        assert!(engine().evaluate_candidate(&atx_case, SlotId::PcCase, &atx_build).compatible);

        let micro = part("mb", ComponentType::Motherboard, "B550M", "AM4 Micro ATX");
        let micro_build = Build::new().with(SlotId::Motherboard, micro);
        let verdict = engine().evaluate_candidate(&itx_case, SlotId::PcCase, &micro_build);
        assert_eq!(
            verdict.reasons,
            vec!["Form Factor Mismatch: Case may not fit the Micro-ATX motherboard"]
        );
    }

    #[test]
    fn test_mini_itx_board_not_checked_per_candidate() {
        let itx_board = part("mb", ComponentType::Motherboard, "B650I", "AM5 DDR5 Mini-ITX");
        let build = Build::new().with(SlotId::Motherboard, itx_board);
        let open_bench = part("case", ComponentType::PcCase, "Open bench", "Test bench frame");

        assert!(engine().evaluate_candidate(&open_bench, SlotId::PcCase, &build).compatible);
        // The whole-build check does cover Mini-ITX.
        let build = build.with(SlotId::PcCase, open_bench);
        let status = engine().evaluate_build(&build);
        assert!(status
            .issues
            .contains(&"Form Factor Mismatch: PC Case may not fit the Mini-ITX Motherboard".to_string()));
    }

    #[test]
    fn test_cooler_warnings() {
        let stealth = part("cool", ComponentType::CpuCooling, "Wraith Stealth", "AMD Wraith Stealth");
        let build = Build::new().with(SlotId::Cpu, am5_cpu());
        let verdict = engine().evaluate_candidate(&stealth, SlotId::Cooler, &build);
        assert_eq!(verdict.reasons, vec!["Cooler may be insufficient for an AM5 processor"]);

        let build = Build::new().with(SlotId::Cpu, am4_cpu());
        let stock = part("cool", ComponentType::CpuCooling, "Box cooler", "Stock cooler for am4");
        let verdict = engine().evaluate_candidate(&stock, SlotId::Cooler, &build);
        assert_eq!(verdict.reasons, vec!["Cooler may be insufficient for a Ryzen 7 processor"]);

        let generic = part("cool", ComponentType::CpuCooling, "Tower", "120mm tower cooler");
        let verdict = engine().evaluate_candidate(&generic, SlotId::Cooler, &build);
        assert_eq!(verdict.reasons, vec!["Cooler may not support the AM4 socket"]);

        let intel = part("cpu", ComponentType::Processor, "Intel Core i5-12400", "LGA 1700");
        let build = Build::new().with(SlotId::Cpu, intel);
        let listed = part("cool", ComponentType::CpuCooling, "Tower", "Fits LGA1700");
        assert!(engine().evaluate_candidate(&listed, SlotId::Cooler, &build).compatible);
    }

    #[test]
    fn test_nvme_drive_rejected_in_sata_slot() {
        let nvme = part("ssd", ComponentType::Ssd, "Samsung 990 Pro", "NVMe M.2");
        let verdict = engine().evaluate_candidate(&nvme, SlotId::SsdSata, &Build::new());
        assert!(!verdict.compatible);
        assert_eq!(
            verdict.reasons,
            vec!["Storage Mismatch: SATA SSD slot requires SATA, but this drive is M.2"]
        );
        assert!(engine().evaluate_candidate(&nvme, SlotId::SsdM2, &Build::new()).compatible);
    }

    #[test]
    fn test_hdd_slot_requires_sata_hdd() {
        let ssd = part("ssd", ComponentType::Ssd, "Samsung 870 EVO", "SATA");
        let verdict = engine().evaluate_candidate(&ssd, SlotId::Hdd, &Build::new());
        assert_eq!(verdict.reasons, vec!["Storage Mismatch: Hard Drive slot requires a SATA HDD"]);

        let hdd = part("hdd", ComponentType::Hdd, "Seagate 2TB", "");
        assert!(engine().evaluate_candidate(&hdd, SlotId::Hdd, &Build::new()).compatible);
    }

    #[test]
    fn test_psu_candidate_floor() {
        let verdict = engine().evaluate_candidate(&psu("Mini 250W SFX"), SlotId::Psu, &Build::new());
        assert!(!verdict.compatible);
        assert!(verdict.reasons[0].contains("250W"));

        assert!(engine().evaluate_candidate(&psu("Generic 300W"), SlotId::Psu, &Build::new()).compatible);
        assert!(engine().evaluate_candidate(&psu("Unrated PSU"), SlotId::Psu, &Build::new()).compatible);
    }

    #[test]
    fn test_reasons_keep_check_order() {
        let laptop_kit = part("ram", ComponentType::Memory, "Crucial 16GB DDR4 SODIMM", "");
        let build = Build::new()
            .with(SlotId::Motherboard, am5_board())
            .with(SlotId::Gpu, laptop_kit.clone());
        let verdict = engine().evaluate_candidate(&laptop_kit, SlotId::Ram, &build);
        // RAM is exempt from the duplicate check, so only memory reasons appear.
        assert_eq!(verdict.reasons.len(), 2);

        let board = part("mb", ComponentType::Motherboard, "B550", "AM4");
        let build = Build::new()
            .with(SlotId::Cpu, am5_cpu())
            .with(SlotId::Gpu, board.clone());
        let verdict = engine().evaluate_candidate(&board, SlotId::Motherboard, &build);
        assert_eq!(
            verdict.reasons,
            vec!["This item is already in your build.", "Socket Mismatch: Requires AM5"]
        );
    }
}

// =============================================================================
// Whole-build evaluation
// =============================================================================

mod build_tests {
    use super::*;

    #[test]
    fn test_empty_build() {
        let status = engine().evaluate_build(&Build::new());
        assert_eq!(status.status, BuildState::Empty);
        assert_eq!(status.message, "Start by adding components to your build.");
        assert!(status.issues.is_empty());
    }

    #[test]
    fn test_lone_motherboard() {
        let build = Build::new().with(SlotId::Motherboard, am5_board());
        let status = engine().evaluate_build(&build);
        assert_eq!(status.status, BuildState::Issues);
        assert_eq!(
            status.issues,
            vec![
                "A Processor is needed for the Motherboard.",
                "Memory (RAM) is needed for the Motherboard.",
                "A PC Case is needed for the Motherboard.",
                "A Power Supply is needed for the Motherboard.",
                "A Power Supply is required.",
            ]
        );
    }

    #[test]
    fn test_orphaned_components() {
        let build = Build::new()
            .with(SlotId::Ram, part("ram", ComponentType::Memory, "16GB DDR5", ""))
            .with(SlotId::PcCase, part("case", ComponentType::PcCase, "H5", "ATX"))
            .with(SlotId::Cooler, part("cool", ComponentType::CpuCooling, "Tower", "AM5"));
        let status = engine().evaluate_build(&build);
        assert_eq!(
            status.issues,
            vec![
                "Memory (RAM) needs a Motherboard to be compatible with.",
                "PC Case needs a Motherboard to check fit.",
                "CPU Cooler needs a Processor to be compatible with.",
            ]
        );
    }

    #[test]
    fn test_motherboard_ram_type_unknown() {
        let board = part("mb", ComponentType::Motherboard, "B650", "AM5 ATX");
        let build = Build::new().with(SlotId::Cpu, am5_cpu()).with(SlotId::Motherboard, board);
        let status = engine().evaluate_build(&build);
        assert!(status
            .issues
            .contains(&"Motherboard RAM type could not be determined.".to_string()));
    }

    #[test]
    fn test_evaluate_build_is_idempotent() {
        let build = Build::new()
            .with(SlotId::Cpu, am4_cpu())
            .with(SlotId::Motherboard, am5_board())
            .with(SlotId::Psu, psu("Generic 300W"));
        let first = engine().evaluate_build(&build);
        let second = engine().evaluate_build(&build);
        assert_eq!(first, second);
    }

    #[test]
    fn test_display_output_requires_gpu() {
        let kf = part("cpu", ComponentType::Processor, "Intel Core i5-12600KF", "");
        assert!(!has_integrated_graphics(&kf));
        let apu = part("cpu", ComponentType::Processor, "AMD Ryzen 5 5600G", "Radeon Graphics");
        assert!(has_integrated_graphics(&apu));

        let message = "A Graphics Card is required for display output: this Processor has no integrated graphics.";
        let status = engine().evaluate_build(&Build::new().with(SlotId::Cpu, kf.clone()));
        assert!(status.issues.contains(&message.to_string()));

        let status = engine().evaluate_build(&Build::new().with(SlotId::Cpu, kf).with(SlotId::Gpu, gpu()));
        assert!(!status.issues.contains(&message.to_string()));

        let status = engine().evaluate_build(&Build::new().with(SlotId::Cpu, apu));
        assert!(!status.issues.contains(&message.to_string()));
    }

    #[test]
    fn test_psu_headroom() {
        let with_psu = |name: &str| {
            Build::new()
                .with(SlotId::Cpu, am5_cpu())
                .with(SlotId::Gpu, gpu())
                .with(SlotId::Psu, psu(name))
        };

        let status = engine().evaluate_build(&with_psu("Corsair 550W"));
        assert!(status.issues.iter().all(|i| !i.contains("undersized")));

        let status = engine().evaluate_build(&with_psu("Generic 300W"));
        assert!(status
            .issues
            .contains(&"Power Supply (300W) may be undersized. Estimated need: 378W.".to_string()));

        // Exactly at the threshold passes.
        let status = engine().evaluate_build(&with_psu("Budget 378W"));
        assert!(status.issues.iter().all(|i| !i.contains("undersized")));
    }

    #[test]
    fn test_psu_headroom_skipped_without_display_path() {
        // No GPU and no iGPU: the wattage estimate does not run.
        let build = Build::new()
            .with(SlotId::Cpu, am4_cpu())
            .with(SlotId::Psu, psu("Generic 200W"));
        let status = engine().evaluate_build(&build);
        assert!(status.issues.iter().all(|i| !i.contains("undersized")));
    }

    #[test]
    fn test_storage_slot_sanity() {
        let board = am5_board();
        let build = Build::new()
            .with(SlotId::Cpu, am5_cpu())
            .with(SlotId::Motherboard, board)
            .with(SlotId::SsdM2, part("sata", ComponentType::Ssd, "870 EVO", "SATA"))
            .with(SlotId::Hdd, part("nvme", ComponentType::Ssd, "990 Pro", "NVMe"));
        let status = engine().evaluate_build(&build);

        let storage: Vec<_> = status
            .issues
            .iter()
            .filter(|i| i.contains("slot") || i.contains("bootable"))
            .cloned()
            .collect();
        assert_eq!(
            storage,
            vec![
                "At least one bootable storage device (SATA SSD or M.2 SSD) is expected.",
                "M.2 NVMe SSD slot expects a M.2 drive, found SATA",
                "Hard Drive (HDD) slot expects a SATA drive, found M.2",
                "Hard Drive (HDD) slot holds a SSD, not an HDD",
            ]
        );
    }

    #[test]
    fn test_report_counts_severities() {
        let build = Build::new()
            .with(SlotId::Cpu, am4_cpu())
            .with(SlotId::Motherboard, am5_board());
        let report = engine().report(&build);
        assert_eq!(report.status.issues.len(), report.details.len());
        assert_eq!(report.stats.total(), report.details.len());
        assert!(report
            .details
            .iter()
            .any(|i| i.rule_id == "cpu_socket" && i.severity == Severity::Error));
    }

    #[test]
    fn test_sodimm_flagged_alongside_ram_type_mismatch() {
        let laptop_kit = part("ram", ComponentType::Memory, "Crucial 16GB DDR4", "SODIMM");
        let build = Build::new()
            .with(SlotId::Cpu, am5_cpu())
            .with(SlotId::Motherboard, am5_board())
            .with(SlotId::Ram, laptop_kit);
        let status = engine().evaluate_build(&build);
        assert_eq!(
            status.issues,
            vec![
                "A PC Case is needed for the Motherboard.",
                "A Power Supply is needed for the Motherboard.",
                "RAM Type Mismatch: Memory is DDR4 but Motherboard requires DDR5",
                "SODIMM RAM is for laptops, not desktops",
                "At least one bootable storage device (SATA SSD or M.2 SSD) is expected.",
                "A Graphics Card is required for display output: this Processor has no integrated graphics.",
                "A Power Supply is required.",
            ]
        );
    }

    #[test]
    fn test_micro_atx_board_case_fit() {
        let board = part("mb", ComponentType::Motherboard, "MSI B550M", "AM4, DDR4, Micro-ATX");
        let with_case = |description: &str| {
            Build::new()
                .with(SlotId::Cpu, am4_cpu())
                .with(SlotId::Motherboard, board.clone())
                .with(SlotId::Ram, part("ram", ComponentType::Memory, "16GB DDR4", ""))
                .with(SlotId::PcCase, part("case", ComponentType::PcCase, "Small case", description))
                .with(SlotId::Psu, psu("Corsair 650W"))
        };

        let status = engine().evaluate_build(&with_case("Mini-ITX only"));
        assert_eq!(
            status.issues,
            vec![
                "Form Factor Mismatch: PC Case may not fit the Micro-ATX Motherboard",
                "At least one bootable storage device (SATA SSD or M.2 SSD) is expected.",
                "A Graphics Card is required for display output: this Processor has no integrated graphics.",
            ]
        );

        let status = engine().evaluate_build(&with_case("Compact m-atx tower"));
        assert!(status.issues.iter().all(|i| !i.contains("Form Factor")));
    }

    #[test]
    fn test_am5_weak_cooler_warning() {
        let cooler = part("cool", ComponentType::CpuCooling, "Wraith", "AMD Wraith Stealth stock cooler");
        let build = Build::new()
            .with(SlotId::Cpu, am5_cpu())
            .with(SlotId::Cooler, cooler);
        let report = engine().report(&build);
        assert_eq!(
            report.status.issues,
            vec![
                "A Motherboard is needed for the Processor.",
                "Cooler may be insufficient for an AM5 processor",
                "A Graphics Card is required for display output: this Processor has no integrated graphics.",
                "A Power Supply is required.",
            ]
        );
        assert_eq!(report.details[1].severity, Severity::Warning);
        assert_eq!(report.details[1].slot, Some(SlotId::Cooler));
    }

    #[test]
    fn test_psu_headroom_with_huge_table_wattage() {
        let cpu = part("cpu-intel", ComponentType::Processor, "Intel Core i5-12400", "LGA 1700");
        let unit = psu("Unlabelled unit");
        let build = Build::new().with(SlotId::Cpu, cpu).with(SlotId::Psu, unit);

        for watts in [858_993_460, 1_000_000_000, u32::MAX] {
            let mut parts = HashMap::new();
            parts.insert(
                "psu".to_string(),
                PartAttributes {
                    wattage: Some(watts),
                    ..Default::default()
                },
            );
            let engine = CompatibilityEngine::with_extractor(Arc::new(PartsTableExtractor::new(parts)));
            let status = engine.evaluate_build(&build);
            assert_eq!(status.issues, vec!["A Motherboard is needed for the Processor."]);
        }
    }
}
