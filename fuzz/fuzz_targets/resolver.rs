#![no_main]

use libfuzzer_sys::fuzz_target;

use kumo_action::{Action, OutputKind};
use kumo_frontend::{
    AuxOutputPaths, FrontendOptions, InputFile, InputFileKind, InputSet, OutputPathResolver,
    RealFileSystem,
};

fuzz_target!(|data: (u8, Vec<String>, Option<String>, Vec<(u8, String)>)| {
    let (action, inputs, output, aux) = data;

    let action = Action::ALL[action as usize % Action::ALL.len()];
    let inputs = inputs
        .into_iter()
        .map(InputFile::new)
        .fold(InputSet::new(InputFileKind::Source), InputSet::with);
    let aux_outputs = aux
        .into_iter()
        .map(|(kind, path)| {
            let kind = OutputKind::AUXILIARY[kind as usize % OutputKind::AUXILIARY.len()];
            (kind, path.into())
        })
        .collect::<AuxOutputPaths>();

    let mut options = FrontendOptions::new(action, inputs);
    options.output = output.map(Into::into);
    options.aux_outputs = aux_outputs;

    let resolved = OutputPathResolver::new(&options, RealFileSystem).resolve();

    // a failed principal resolution never leaves partial results behind
    assert!(resolved.principal.is_empty() || resolved.principal.len() == options.inputs.len());
});
